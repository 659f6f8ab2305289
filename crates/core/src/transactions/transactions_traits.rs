use crate::errors::Result;
use crate::transactions::transactions_model::{Transaction, TransactionInput};
use async_trait::async_trait;

/// Trait for transaction repository operations.
///
/// Every mutation is scoped by `(transaction_id, user_id)`.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Transactions of one user, most recent `date` first.
    fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>>;
    async fn insert_transaction(
        &self,
        user_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction>;
    /// Returns `None` when no transaction matches both ids.
    async fn update_transaction(
        &self,
        user_id: i64,
        transaction_id: i64,
        input: TransactionInput,
    ) -> Result<Option<Transaction>>;
    async fn delete_transaction(&self, user_id: i64, transaction_id: i64) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, user_id: i64) -> Result<Vec<Transaction>>;
    async fn create_transaction(
        &self,
        user_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        user_id: i64,
        transaction_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: i64, transaction_id: i64) -> Result<()>;
}
