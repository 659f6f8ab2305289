//! Crypto holding domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A quantity of a coin bought at a given unit price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoHolding {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub amount: Decimal,
    pub purchase_price: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a new holding
#[derive(Debug, Clone, PartialEq)]
pub struct NewCryptoHolding {
    pub symbol: String,
    pub amount: Decimal,
    pub purchase_price: Decimal,
}
