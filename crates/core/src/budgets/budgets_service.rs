use crate::budgets::budgets_model::{Budget, BudgetInput};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

const BUDGET: &str = "Budget";

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(budget_repo: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { budget_repo }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: i64) -> Result<Vec<Budget>> {
        self.budget_repo.list_budgets(user_id)
    }

    async fn create_budget(&self, user_id: i64, input: BudgetInput) -> Result<Budget> {
        self.budget_repo.insert_budget(user_id, input).await
    }

    async fn update_budget(
        &self,
        user_id: i64,
        budget_id: i64,
        input: BudgetInput,
    ) -> Result<Budget> {
        self.budget_repo
            .update_budget(user_id, budget_id, input)
            .await?
            .ok_or_else(|| Error::NotFound(BUDGET.to_string()))
    }

    async fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<()> {
        match self.budget_repo.delete_budget(user_id, budget_id).await? {
            0 => Err(Error::NotFound(BUDGET.to_string())),
            _ => Ok(()),
        }
    }
}
