//! SQLite storage implementation for transactions.

mod model;
mod repository;

pub use model::{NewTransactionDB, TransactionChangesDB, TransactionDB};
pub use repository::TransactionRepository;
