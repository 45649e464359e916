//! Request handlers for the two exposed endpoints.
//!
//! Both are stateless: every invocation performs its own upstream fetches
//! and keeps nothing between requests.

pub mod binary;
pub mod version;

pub use binary::BinaryProxyHandler;
pub use version::VersionCheckHandler;
