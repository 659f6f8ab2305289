//! Database models for crypto holdings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::crypto::{CryptoHolding, NewCryptoHolding};

use crate::utils::parse_decimal_tolerant;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::crypto_holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CryptoHoldingDB {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub amount: String,
    pub purchase_price: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::crypto_holdings)]
pub struct NewCryptoHoldingDB {
    pub user_id: i64,
    pub symbol: String,
    pub amount: String,
    pub purchase_price: String,
    pub created_at: NaiveDateTime,
}

impl NewCryptoHoldingDB {
    pub fn new(user_id: i64, holding: NewCryptoHolding, created_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            symbol: holding.symbol,
            amount: holding.amount.to_string(),
            purchase_price: holding.purchase_price.to_string(),
            created_at,
        }
    }
}

impl From<CryptoHoldingDB> for CryptoHolding {
    fn from(db: CryptoHoldingDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            purchase_price: parse_decimal_tolerant(&db.purchase_price, "purchase_price"),
            created_at: db.created_at,
        }
    }
}
