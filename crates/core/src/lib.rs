//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the finance tracker: the
//! credential store, the per-user ledger (budgets, transactions, crypto
//! holdings) and the dashboard summary. It is database-agnostic and defines
//! repository traits that are implemented by the `storage-sqlite` crate.

pub mod budgets;
pub mod crypto;
pub mod errors;
pub mod summary;
pub mod transactions;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
