use crate::crypto::crypto_model::{CryptoHolding, NewCryptoHolding};
use crate::crypto::crypto_prices::CryptoPrices;
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for crypto holding repository operations.
///
/// Holdings can only be listed and added.
#[async_trait]
pub trait CryptoRepositoryTrait: Send + Sync {
    /// Holdings of one user, newest first.
    fn list_holdings(&self, user_id: i64) -> Result<Vec<CryptoHolding>>;
    async fn insert_holding(
        &self,
        user_id: i64,
        new_holding: NewCryptoHolding,
    ) -> Result<CryptoHolding>;
}

/// Trait for crypto service operations
#[async_trait]
pub trait CryptoServiceTrait: Send + Sync {
    fn get_holdings(&self, user_id: i64) -> Result<Vec<CryptoHolding>>;
    async fn add_holding(
        &self,
        user_id: i64,
        new_holding: NewCryptoHolding,
    ) -> Result<CryptoHolding>;
    fn get_prices(&self) -> CryptoPrices;
}
