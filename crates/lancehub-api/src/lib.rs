//! LanceHub operation facade.
//!
//! Hosts configuration loading, logging init, the service wiring, and
//! the [`LanceHub`] facade that exposes the full operation set to a
//! transport layer. Every failure crossing the facade is a
//! `ServiceError` with a result tag; nothing below leaks through raw.

pub mod config;
pub mod context;
pub mod logging;
pub mod ops;

pub use config::ServerConfig;
pub use context::AppContext;
pub use logging::init_logging;
pub use ops::{ApiResponse, LanceHub, SessionResponse};
