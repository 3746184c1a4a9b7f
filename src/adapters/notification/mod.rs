//! Notification dispatcher strategies
//!
//! Both implement NotificationPort on top of a MailTransportPort:
//! - Redirect: one message to the operator address
//! - Direct: one message per recipient

pub mod direct;
pub mod redirect;

pub use direct::DirectDispatcher;
pub use redirect::RedirectDispatcher;
