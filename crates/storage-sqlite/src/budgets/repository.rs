use fintrack_core::budgets::{Budget, BudgetInput, BudgetRepositoryTrait};
use fintrack_core::Result;

use super::model::{BudgetChangesDB, BudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_budgets(&self, user_id: i64) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let budgets_db = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .order((budgets::created_at.desc(), budgets::id.desc()))
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;
        Ok(budgets_db.into_iter().map(Budget::from).collect())
    }

    async fn insert_budget(&self, user_id: i64, input: BudgetInput) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let new_budget_db = NewBudgetDB::new(user_id, input, Utc::now().naive_utc());
                let result_db = diesel::insert_into(budgets::table)
                    .values(&new_budget_db)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Budget::from(result_db))
            })
            .await
    }

    async fn update_budget(
        &self,
        user_id: i64,
        budget_id: i64,
        input: BudgetInput,
    ) -> Result<Option<Budget>> {
        let changes: BudgetChangesDB = input.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Budget>> {
                let result_db = diesel::update(
                    budgets::table
                        .filter(budgets::id.eq(budget_id))
                        .filter(budgets::user_id.eq(user_id)),
                )
                .set(&changes)
                .returning(BudgetDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                Ok(result_db.map(Budget::from))
            })
            .await
    }

    async fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(budget_id))
                        .filter(budgets::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, write_actor::spawn_writer};
    use crate::users::UserRepository;
    use fintrack_core::budgets::BudgetPeriod;
    use fintrack_core::users::{NewUser, UserRepositoryTrait};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    /// Creates the repositories over a fresh temp database.
    /// Returns the temp dir as well to keep it alive.
    async fn create_test_repositories() -> (BudgetRepository, UserRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let budget_repo = BudgetRepository::new(Arc::clone(&pool), writer.clone());
        let user_repo = UserRepository::new(pool, writer);
        (budget_repo, user_repo, temp_dir)
    }

    async fn create_user(repo: &UserRepository, email: &str) -> i64 {
        repo.insert_user(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now().naive_utc(),
        })
        .await
        .expect("Failed to create user")
        .id
    }

    fn input(category: &str, amount: Decimal) -> BudgetInput {
        BudgetInput {
            category: category.to_string(),
            amount,
            period: BudgetPeriod::Monthly,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_zero_spent() {
        let (repo, users, _temp_dir) = create_test_repositories().await;
        let user_id = create_user(&users, "a@x.com").await;

        let first = repo.insert_budget(user_id, input("Food", dec!(100))).await.unwrap();
        let second = repo.insert_budget(user_id, input("Rent", dec!(900.50))).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.spent, Decimal::ZERO);
        assert_eq!(second.amount, dec!(900.50));
        assert_eq!(first.period, BudgetPeriod::Monthly);
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let (repo, users, _temp_dir) = create_test_repositories().await;
        let ana = create_user(&users, "a@x.com").await;
        let bob = create_user(&users, "b@x.com").await;

        let food = repo.insert_budget(ana, input("Food", dec!(100))).await.unwrap();
        let rent = repo.insert_budget(ana, input("Rent", dec!(900))).await.unwrap();
        repo.insert_budget(bob, input("Travel", dec!(50))).await.unwrap();

        let ids: Vec<i64> = repo.list_budgets(ana).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![rent.id, food.id]);
        assert_eq!(repo.list_budgets(bob).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_require_ownership() {
        let (repo, users, _temp_dir) = create_test_repositories().await;
        let ana = create_user(&users, "a@x.com").await;
        let bob = create_user(&users, "b@x.com").await;
        let food = repo.insert_budget(ana, input("Food", dec!(100))).await.unwrap();

        let foreign_update = repo
            .update_budget(bob, food.id, input("Hijacked", dec!(1)))
            .await
            .unwrap();
        assert!(foreign_update.is_none());
        assert_eq!(repo.delete_budget(bob, food.id).await.unwrap(), 0);

        let updated = repo
            .update_budget(ana, food.id, input("Groceries", dec!(120)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.category, "Groceries");
        assert_eq!(updated.amount, dec!(120));
        assert_eq!(updated.created_at, food.created_at);

        assert_eq!(repo.delete_budget(ana, food.id).await.unwrap(), 1);
        assert!(repo.list_budgets(ana).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_violates_foreign_key() {
        let (repo, _users, _temp_dir) = create_test_repositories().await;

        let result = repo.insert_budget(999, input("Food", dec!(100))).await;

        assert!(matches!(result, Err(fintrack_core::Error::Database(_))));
    }
}
