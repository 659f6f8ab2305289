use crate::budgets::budgets_model::{Budget, BudgetInput};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations.
///
/// Every mutation is scoped by `(budget_id, user_id)`.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Budgets of one user, newest first.
    fn list_budgets(&self, user_id: i64) -> Result<Vec<Budget>>;
    async fn insert_budget(&self, user_id: i64, input: BudgetInput) -> Result<Budget>;
    /// Returns `None` when no budget matches both ids.
    async fn update_budget(
        &self,
        user_id: i64,
        budget_id: i64,
        input: BudgetInput,
    ) -> Result<Option<Budget>>;
    /// Returns the number of deleted rows.
    async fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: i64) -> Result<Vec<Budget>>;
    async fn create_budget(&self, user_id: i64, input: BudgetInput) -> Result<Budget>;
    async fn update_budget(
        &self,
        user_id: i64,
        budget_id: i64,
        input: BudgetInput,
    ) -> Result<Budget>;
    async fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<()>;
}
