use crate::errors::{Error, Result};
use crate::transactions::transactions_model::{Transaction, TransactionInput};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use async_trait::async_trait;
use std::sync::Arc;

const TRANSACTION: &str = "Transaction";

pub struct TransactionService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { transaction_repo }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        self.transaction_repo.list_transactions(user_id)
    }

    async fn create_transaction(
        &self,
        user_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        self.transaction_repo
            .insert_transaction(user_id, input)
            .await
    }

    async fn update_transaction(
        &self,
        user_id: i64,
        transaction_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        self.transaction_repo
            .update_transaction(user_id, transaction_id, input)
            .await?
            .ok_or_else(|| Error::NotFound(TRANSACTION.to_string()))
    }

    async fn delete_transaction(&self, user_id: i64, transaction_id: i64) -> Result<()> {
        match self
            .transaction_repo
            .delete_transaction(user_id, transaction_id)
            .await?
        {
            0 => Err(Error::NotFound(TRANSACTION.to_string())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::TransactionType;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockTransactionRepository {
        transactions: Mutex<Vec<Transaction>>,
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
            let mut list: Vec<Transaction> = self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect();
            list.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
            Ok(list)
        }

        async fn insert_transaction(
            &self,
            user_id: i64,
            input: TransactionInput,
        ) -> Result<Transaction> {
            let mut transactions = self.transactions.lock().unwrap();
            let transaction = Transaction {
                id: transactions.len() as i64 + 1,
                user_id,
                description: input.description,
                amount: input.amount,
                category: input.category,
                transaction_type: input.transaction_type,
                date: input.date,
                created_at: Utc::now().naive_utc(),
            };
            transactions.push(transaction.clone());
            Ok(transaction)
        }

        async fn update_transaction(
            &self,
            user_id: i64,
            transaction_id: i64,
            input: TransactionInput,
        ) -> Result<Option<Transaction>> {
            let mut transactions = self.transactions.lock().unwrap();
            Ok(transactions
                .iter_mut()
                .find(|t| t.id == transaction_id && t.user_id == user_id)
                .map(|t| {
                    t.description = input.description;
                    t.amount = input.amount;
                    t.category = input.category;
                    t.transaction_type = input.transaction_type;
                    t.date = input.date;
                    t.clone()
                }))
        }

        async fn delete_transaction(&self, user_id: i64, transaction_id: i64) -> Result<usize> {
            let mut transactions = self.transactions.lock().unwrap();
            let before = transactions.len();
            transactions.retain(|t| !(t.id == transaction_id && t.user_id == user_id));
            Ok(before - transactions.len())
        }
    }

    fn groceries(day: u32) -> TransactionInput {
        TransactionInput {
            description: "Groceries".to_string(),
            amount: dec!(-42.10),
            category: "Food".to_string(),
            transaction_type: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_descending() {
        let service = TransactionService::new(Arc::new(MockTransactionRepository::default()));
        service.create_transaction(1, groceries(3)).await.unwrap();
        service.create_transaction(1, groceries(20)).await.unwrap();
        service.create_transaction(1, groceries(11)).await.unwrap();

        let days: Vec<u32> = service
            .get_transactions(1)
            .unwrap()
            .iter()
            .map(|t| chrono::Datelike::day(&t.date))
            .collect();

        assert_eq!(days, vec![20, 11, 3]);
    }

    #[tokio::test]
    async fn test_sign_is_kept_as_submitted() {
        let service = TransactionService::new(Arc::new(MockTransactionRepository::default()));
        let mut input = groceries(1);
        input.amount = dec!(42.10);

        let created = service.create_transaction(1, input).await.unwrap();

        assert_eq!(created.amount, dec!(42.10));
        assert_eq!(created.transaction_type, TransactionType::Expense);
    }

    #[tokio::test]
    async fn test_foreign_mutations_are_not_found() {
        let service = TransactionService::new(Arc::new(MockTransactionRepository::default()));
        let created = service.create_transaction(1, groceries(1)).await.unwrap();

        assert!(matches!(
            service.update_transaction(2, created.id, groceries(2)).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            service.delete_transaction(2, created.id).await,
            Err(Error::NotFound(_))
        ));
        assert_eq!(service.get_transactions(1).unwrap().len(), 1);
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"income\"");
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
