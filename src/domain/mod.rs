/// Domain layer - core business models
///
/// These models and pure functions are transport-agnostic.
pub mod contacts;
pub mod email;
pub mod models;
pub mod prompts;
