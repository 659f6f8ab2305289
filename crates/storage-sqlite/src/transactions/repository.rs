use fintrack_core::transactions::{Transaction, TransactionInput, TransactionRepositoryTrait};
use fintrack_core::Result;

use super::model::{NewTransactionDB, TransactionChangesDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let transactions_db = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((transactions::date.desc(), transactions::id.desc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(transactions_db
            .into_iter()
            .map(Transaction::from)
            .collect())
    }

    async fn insert_transaction(
        &self,
        user_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let new_transaction_db =
                    NewTransactionDB::new(user_id, input, Utc::now().naive_utc());
                let result_db = diesel::insert_into(transactions::table)
                    .values(&new_transaction_db)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Transaction::from(result_db))
            })
            .await
    }

    async fn update_transaction(
        &self,
        user_id: i64,
        transaction_id: i64,
        input: TransactionInput,
    ) -> Result<Option<Transaction>> {
        let changes: TransactionChangesDB = input.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Transaction>> {
                let result_db = diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(user_id)),
                )
                .set(&changes)
                .returning(TransactionDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                Ok(result_db.map(Transaction::from))
            })
            .await
    }

    async fn delete_transaction(&self, user_id: i64, transaction_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(user_id)),
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
    use chrono::NaiveDate;
    use fintrack_core::transactions::TransactionType;
    use fintrack_core::users::{NewUser, UserRepositoryTrait};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn setup() -> (TransactionRepository, i64, i64, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let users = UserRepository::new(Arc::clone(&pool), writer.clone());
        let mut ids = Vec::new();
        for email in ["ana@x.com", "bob@x.com"] {
            let user = users
                .insert_user(NewUser {
                    name: "Test".to_string(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    created_at: Utc::now().naive_utc(),
                })
                .await
                .expect("Failed to create user");
            ids.push(user.id);
        }

        (
            TransactionRepository::new(pool, writer),
            ids[0],
            ids[1],
            temp_dir,
        )
    }

    fn entry(description: &str, amount: Decimal, day: u32) -> TransactionInput {
        TransactionInput {
            description: description.to_string(),
            amount,
            category: "General".to_string(),
            transaction_type: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_id() {
        let (repo, ana, _bob, _temp_dir) = setup().await;

        let early = repo.insert_transaction(ana, entry("early", dec!(1), 1)).await.unwrap();
        let late = repo.insert_transaction(ana, entry("late", dec!(2), 20)).await.unwrap();
        let late_again = repo
            .insert_transaction(ana, entry("late again", dec!(3), 20))
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_transactions(ana)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![late_again.id, late.id, early.id]);
    }

    #[tokio::test]
    async fn test_round_trips_negative_amount_and_type() {
        let (repo, ana, _bob, _temp_dir) = setup().await;

        let mut salary = entry("Salary", dec!(-2500.75), 5);
        salary.transaction_type = TransactionType::Income;
        let created = repo.insert_transaction(ana, salary).await.unwrap();

        let stored = &repo.list_transactions(ana).unwrap()[0];
        assert_eq!(stored, &created);
        assert_eq!(stored.amount, dec!(-2500.75));
        assert_eq!(stored.transaction_type, TransactionType::Income);
        assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[tokio::test]
    async fn test_mutations_are_scoped_to_owner() {
        let (repo, ana, bob, _temp_dir) = setup().await;
        let rent = repo.insert_transaction(ana, entry("Rent", dec!(900), 1)).await.unwrap();

        assert!(repo
            .update_transaction(bob, rent.id, entry("Stolen", dec!(1), 2))
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.delete_transaction(bob, rent.id).await.unwrap(), 0);
        assert!(repo.list_transactions(bob).unwrap().is_empty());

        let updated = repo
            .update_transaction(ana, rent.id, entry("Rent (March)", dec!(950), 2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "Rent (March)");
        assert_eq!(updated.amount, dec!(950));

        assert_eq!(repo.delete_transaction(ana, rent.id).await.unwrap(), 1);
        assert_eq!(repo.delete_transaction(ana, rent.id).await.unwrap(), 0);
    }
}
