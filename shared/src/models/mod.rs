//! Data models
//!
//! Shared between the server and the front ends (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL).

pub mod booking;
pub mod deal;
pub mod food_item;
pub mod menu;

// Re-exports
pub use booking::*;
pub use deal::*;
pub use food_item::*;
pub use menu::*;
