//! Shared types for the menu service
//!
//! Data models, the unified API error type, response envelope and the
//! pure pricing logic used by the server.

pub mod error;
pub mod models;
pub mod pricing;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};
