use std::sync::Arc;

use rust_decimal::Decimal;

use crate::budgets::{Budget, BudgetRepositoryTrait};
use crate::crypto::{price_of, CryptoHolding, CryptoRepositoryTrait};
use crate::errors::{Error, Result};
use crate::summary::summary_model::DashboardSummary;
use crate::transactions::{Transaction, TransactionRepositoryTrait, TransactionType};

pub trait SummaryServiceTrait: Send + Sync {
    fn get_summary(&self, user_id: i64) -> Result<DashboardSummary>;
}

pub struct SummaryService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    crypto_repo: Arc<dyn CryptoRepositoryTrait>,
}

impl SummaryService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
        crypto_repo: Arc<dyn CryptoRepositoryTrait>,
    ) -> Self {
        SummaryService {
            budget_repo,
            transaction_repo,
            crypto_repo,
        }
    }
}

impl SummaryServiceTrait for SummaryService {
    fn get_summary(&self, user_id: i64) -> Result<DashboardSummary> {
        let budgets = self.budget_repo.list_budgets(user_id)?;
        let transactions = self.transaction_repo.list_transactions(user_id)?;
        let holdings = self.crypto_repo.list_holdings(user_id)?;
        summarize(&budgets, &transactions, &holdings)
    }
}

fn out_of_range() -> Error {
    Error::OutOfRange("Dashboard totals".to_string())
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(out_of_range)
}

fn checked_diff(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

/// Folds one user's ledger into dashboard totals. Holdings whose symbol has
/// no known price contribute zero value but still count towards cost basis.
///
/// Totals that exceed the decimal range are an `OutOfRange` error.
pub fn summarize(
    budgets: &[Budget],
    transactions: &[Transaction],
    holdings: &[CryptoHolding],
) -> Result<DashboardSummary> {
    let total_budget = checked_sum(budgets.iter().map(|b| b.amount))?;
    let total_spent = checked_sum(budgets.iter().map(|b| b.spent))?;

    let cash_flow = |kind: TransactionType| {
        checked_sum(
            transactions
                .iter()
                .filter(|t| t.transaction_type == kind)
                .map(|t| t.amount.abs()),
        )
    };
    let total_income = cash_flow(TransactionType::Income)?;
    let total_expenses = cash_flow(TransactionType::Expense)?;

    let values = holdings
        .iter()
        .map(|h| {
            h.amount
                .checked_mul(price_of(&h.symbol).unwrap_or(Decimal::ZERO))
                .ok_or_else(out_of_range)
        })
        .collect::<Result<Vec<_>>>()?;
    let crypto_value = checked_sum(values)?;
    let costs = holdings
        .iter()
        .map(|h| h.amount.checked_mul(h.purchase_price).ok_or_else(out_of_range))
        .collect::<Result<Vec<_>>>()?;
    let crypto_cost_basis = checked_sum(costs)?;

    Ok(DashboardSummary {
        total_budget,
        total_spent,
        budget_remaining: checked_diff(total_budget, total_spent)?,
        total_income,
        total_expenses,
        net_cash_flow: checked_diff(total_income, total_expenses)?,
        crypto_value,
        crypto_cost_basis,
        crypto_profit_loss: checked_diff(crypto_value, crypto_cost_basis)?,
        budget_count: budgets.len(),
        transaction_count: transactions.len(),
        holding_count: holdings.len(),
    })
}
