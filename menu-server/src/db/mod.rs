//! Database access layer
//!
//! Plain async functions over `&PgPool`. Multi-statement operations
//! run inside a single transaction.

pub mod bookings;
pub mod deals;
pub mod food_items;
pub mod menus;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
