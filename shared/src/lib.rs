//! Shared types for the Unity Rewards platform
//!
//! Wire-level data models and response structures used by the API server
//! and the storefront/admin front ends.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
