//! Data models
//!
//! Shared between worksync-server and the browser client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (snowflake, SQLite INTEGER PRIMARY KEY).

pub mod contact;
pub mod employee;
pub mod payment;
pub mod worksheet;

// Re-exports
pub use contact::*;
pub use employee::*;
pub use payment::*;
pub use worksheet::*;
