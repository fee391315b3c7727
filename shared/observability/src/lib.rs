//! Observability for the companies toolbox.
//!
//! - tracing subscriber setup (pretty for development, JSON for production)
//! - trace id propagation from incoming request headers
//! - actix-web middleware logging every request with its outcome and latency

pub mod init;
pub mod middleware;
pub mod trace_context;

pub use init::*;
pub use middleware::*;
pub use trace_context::*;
