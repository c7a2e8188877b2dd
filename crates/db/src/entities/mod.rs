//! `SeaORM` entity definitions.
//!
//! Enum-valued columns are stored as TEXT and parsed into core domain
//! enums at the repository boundary.

pub mod funds;
pub mod transactions;
