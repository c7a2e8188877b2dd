//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Domain validation runs in `baitulmal-core`; repositories
//! execute it at the right point inside their transactions.

pub mod fund;
pub mod transaction;

pub use fund::{FundRepository, FundStoreError};
pub use transaction::{TransactionFilter, TransactionRepository, TransactionStoreError};
