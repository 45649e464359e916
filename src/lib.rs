//! WiRSa firmware update service.
//!
//! Answers "what is the latest release?" and "give me the latest binary" on
//! behalf of devices that cannot talk to the GitHub API themselves.

pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::UpdateConfig;
pub use error::{UpdateError, UpdateResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
