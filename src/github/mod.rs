//! Upstream release subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (build latest-release URL)
//!     → fetcher.rs (GET with redirects and User-Agent)
//!     → release.rs (typed JSON schema, field validation)
//!     → handler
//! ```

pub mod client;
pub mod fetcher;
pub mod release;

pub use client::ReleaseClient;
pub use fetcher::{Fetcher, HttpFetcher};
pub use release::{ReleaseAsset, ReleaseMetadata};
