//! External service adapters
//!
//! This module contains adapters for external APIs including:
//! - LLM (Large Language Model) services
//! - Email delivery services

pub mod llm;
pub mod mail;
