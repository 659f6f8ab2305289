use fintrack_core::crypto::{CryptoHolding, CryptoRepositoryTrait, NewCryptoHolding};
use fintrack_core::Result;

use super::model::{CryptoHoldingDB, NewCryptoHoldingDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::crypto_holdings;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct CryptoRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CryptoRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CryptoRepository { pool, writer }
    }
}

#[async_trait]
impl CryptoRepositoryTrait for CryptoRepository {
    fn list_holdings(&self, user_id: i64) -> Result<Vec<CryptoHolding>> {
        let mut conn = get_connection(&self.pool)?;
        let holdings_db = crypto_holdings::table
            .filter(crypto_holdings::user_id.eq(user_id))
            .order((crypto_holdings::created_at.desc(), crypto_holdings::id.desc()))
            .select(CryptoHoldingDB::as_select())
            .load::<CryptoHoldingDB>(&mut conn)
            .into_core()?;
        Ok(holdings_db.into_iter().map(CryptoHolding::from).collect())
    }

    async fn insert_holding(
        &self,
        user_id: i64,
        new_holding: NewCryptoHolding,
    ) -> Result<CryptoHolding> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CryptoHolding> {
                let holding_db =
                    NewCryptoHoldingDB::new(user_id, new_holding, Utc::now().naive_utc());
                let result_db = diesel::insert_into(crypto_holdings::table)
                    .values(&holding_db)
                    .returning(CryptoHoldingDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(CryptoHolding::from(result_db))
            })
            .await
    }
}
