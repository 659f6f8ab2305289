//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::budgets::{Budget, BudgetInput, BudgetPeriod};

use crate::utils::parse_decimal_tolerant;

/// Database model for budgets. Amounts are stored as TEXT.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: String,
    pub spent: String,
    pub period: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new budget
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDB {
    pub user_id: i64,
    pub category: String,
    pub amount: String,
    pub spent: String,
    pub period: String,
    pub created_at: NaiveDateTime,
}

/// Columns a budget update may touch.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct BudgetChangesDB {
    pub category: String,
    pub amount: String,
    pub period: String,
}

impl NewBudgetDB {
    pub fn new(user_id: i64, input: BudgetInput, created_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            category: input.category,
            amount: input.amount.to_string(),
            spent: "0".to_string(),
            period: input.period.as_str().to_string(),
            created_at,
        }
    }
}

impl From<BudgetInput> for BudgetChangesDB {
    fn from(input: BudgetInput) -> Self {
        Self {
            category: input.category,
            amount: input.amount.to_string(),
            period: input.period.as_str().to_string(),
        }
    }
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        let period = db.period.parse::<BudgetPeriod>().unwrap_or_else(|e| {
            log::warn!("Budget {} has an invalid period: {}", db.id, e);
            BudgetPeriod::default()
        });
        Self {
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            spent: parse_decimal_tolerant(&db.spent, "spent"),
            period,
            created_at: db.created_at,
        }
    }
}
