//! Crypto module - holdings, the static price table, services, and traits.

mod crypto_model;
mod crypto_prices;
mod crypto_service;
mod crypto_traits;

pub use crypto_model::{CryptoHolding, NewCryptoHolding};
pub use crypto_prices::{crypto_prices, price_of, CryptoPrices};
pub use crypto_service::CryptoService;
pub use crypto_traits::{CryptoRepositoryTrait, CryptoServiceTrait};
