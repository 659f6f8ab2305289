use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals shown on the dashboard.
///
/// Income and expense totals use absolute amounts, so a user who enters
/// expenses as positive numbers gets the same figures as one who negates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub budget_remaining: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_cash_flow: Decimal,
    pub crypto_value: Decimal,
    pub crypto_cost_basis: Decimal,
    pub crypto_profit_loss: Decimal,
    pub budget_count: usize,
    pub transaction_count: usize,
    pub holding_count: usize,
}
