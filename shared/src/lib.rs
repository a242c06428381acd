//! Shared types for WorkSync
//!
//! Data models, the unified error system, and small utilities used by the
//! server crate and mirrored by the browser client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
