use crate::crypto::crypto_model::{CryptoHolding, NewCryptoHolding};
use crate::crypto::crypto_prices::{crypto_prices, CryptoPrices};
use crate::crypto::crypto_traits::{CryptoRepositoryTrait, CryptoServiceTrait};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CryptoService {
    crypto_repo: Arc<dyn CryptoRepositoryTrait>,
}

impl CryptoService {
    pub fn new(crypto_repo: Arc<dyn CryptoRepositoryTrait>) -> Self {
        CryptoService { crypto_repo }
    }
}

#[async_trait]
impl CryptoServiceTrait for CryptoService {
    fn get_holdings(&self, user_id: i64) -> Result<Vec<CryptoHolding>> {
        self.crypto_repo.list_holdings(user_id)
    }

    async fn add_holding(
        &self,
        user_id: i64,
        new_holding: NewCryptoHolding,
    ) -> Result<CryptoHolding> {
        self.crypto_repo.insert_holding(user_id, new_holding).await
    }

    fn get_prices(&self) -> CryptoPrices {
        crypto_prices()
    }
}
