/// HTTP API
///
/// Thin axum handlers over the pipeline services and notification port.
pub mod email;
pub mod error;
pub mod health;
pub mod server;
pub mod summary;
pub mod upload;

pub use server::{router, serve};
