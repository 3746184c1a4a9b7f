/// Adapters - concrete implementations
///
/// These modules implement the port traits for specific services.
pub mod notification;
pub mod services;
pub mod storage;
