//! Email transport adapters

pub mod resend;

pub use resend::{ResendService, DEFAULT_RESEND_BASE_URL};
