//! HTTP server module.
//!
//! Binds the configured address and serves plain HTTP; TLS terminates at the
//! load balancer. Shuts down gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{bind_addr, start_server, ServerError};
