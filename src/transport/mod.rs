//! Transport layer for CLI and HTTP communication

pub mod cli;
pub mod errors;
pub mod http;

pub use errors::ApiError;
pub use http::{build_router, AppState};
