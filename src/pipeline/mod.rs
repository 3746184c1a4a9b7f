//! Request pipeline services
//!
//! Stateless services composed from ports: file intake and summary generation.

pub mod intake;
pub mod summary;

pub use intake::{FileIntake, IncomingFile};
pub use summary::SummaryGenerator;
