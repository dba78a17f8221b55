//! Resume Roaster HTTP API Server
//!
//! Exposes the analysis pipeline, status pings and health under `/api`.

pub mod error;
pub mod health;
pub mod server;
pub mod status;
pub mod upload;

pub use error::ApiError;
pub use server::{build_router, shutdown_signal, start_server, GatewayState, DEFAULT_MAX_UPLOAD_BYTES};
