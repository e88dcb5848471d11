//! Middleware module
//!
//! This module contains the binding between the translator and a host
//! conversational framework.

pub mod binding;

// Re-export commonly used middleware
pub use binding::{AppHost, Middleware, TurnContext};
