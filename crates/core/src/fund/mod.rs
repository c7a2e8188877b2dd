//! Named funds and their lifecycle rules.
//!
//! A fund is a named bucket that transactions are attributed to. The one
//! hard rule lives here: a fund that is still referenced by transactions
//! cannot be deleted, only deactivated.

pub mod error;
pub mod service;
pub mod types;

pub use error::FundError;
pub use service::FundService;
pub use types::{Fund, FundPatch, FundType, NewFund};
