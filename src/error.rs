/// Error types for Meeting Mailer
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Contact list parse error: {0}")]
    Parse(String),

    #[error("Summary generation failed: {0}")]
    SummaryGeneration(String),

    #[error("Failed to parse summary response: {0}")]
    SummaryParse(String),

    #[error("Email delivery is not configured: {0}")]
    DispatchConfiguration(String),

    #[error("Email delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),


    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
