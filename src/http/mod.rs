//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers (version check / binary proxy)
//!     → response.rs (attachment headers, error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
