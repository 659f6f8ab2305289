//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use fintrack_core::transactions::{Transaction, TransactionInput, TransactionType};

use crate::utils::parse_decimal_tolerant;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub transaction_type: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub user_id: i64,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub transaction_type: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesDB {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub transaction_type: String,
    pub date: NaiveDate,
}

impl NewTransactionDB {
    pub fn new(user_id: i64, input: TransactionInput, created_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            description: input.description,
            amount: input.amount.to_string(),
            category: input.category,
            transaction_type: input.transaction_type.as_str().to_string(),
            date: input.date,
            created_at,
        }
    }
}

impl From<TransactionInput> for TransactionChangesDB {
    fn from(input: TransactionInput) -> Self {
        Self {
            description: input.description,
            amount: input.amount.to_string(),
            category: input.category,
            transaction_type: input.transaction_type.as_str().to_string(),
            date: input.date,
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        // The column carries a CHECK constraint, so this only trips on hand-edited rows.
        let transaction_type = db
            .transaction_type
            .parse::<TransactionType>()
            .unwrap_or_else(|e| {
                log::warn!("Transaction {} has an invalid type: {}", db.id, e);
                TransactionType::Expense
            });
        Self {
            id: db.id,
            user_id: db.user_id,
            description: db.description,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            category: db.category,
            transaction_type,
            date: db.date,
            created_at: db.created_at,
        }
    }
}
