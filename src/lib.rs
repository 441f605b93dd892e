//! aws-signal-app: a small JSON service to put behind a load balancer.
//!
//! Reports which host answered a request, exposes a health check, and can burn
//! CPU on demand so load generators have something to push against.

pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod work;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
