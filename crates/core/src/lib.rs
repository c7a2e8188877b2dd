//! Core business logic for Baitulmal.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `finance` - Transactions, categories, and period aggregation
//! - `fund` - Named funds and their lifecycle rules
//! - `cache` - Tag-invalidated cache for derived report views

pub mod cache;
pub mod finance;
pub mod fund;
