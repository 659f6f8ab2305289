//! SQLite storage implementation for crypto holdings.

mod model;
mod repository;

pub use model::{CryptoHoldingDB, NewCryptoHoldingDB};
pub use repository::CryptoRepository;
