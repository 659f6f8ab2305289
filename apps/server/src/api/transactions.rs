use std::sync::Arc;

use crate::{
    api::shared::{path_id, DeletedResponse},
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    validation::{AppJson, Validator},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::transactions::{Transaction, TransactionInput, TransactionType};
use serde::Deserialize;
use serde_json::Value;

const ENTITY: &str = "Transaction";

#[derive(Deserialize)]
struct TransactionPayload {
    description: Option<Value>,
    amount: Option<Value>,
    category: Option<Value>,
    #[serde(rename = "type")]
    transaction_type: Option<Value>,
    date: Option<Value>,
}

impl TransactionPayload {
    /// Amounts may be negative; the sign is stored as submitted.
    fn validate(self) -> ApiResult<TransactionInput> {
        let mut v = Validator::new();
        let description = v.text(
            "description",
            self.description.as_ref(),
            1,
            "Description required",
        );
        let amount = v.decimal("amount", self.amount.as_ref(), None, "Valid amount required");
        let category = v.text("category", self.category.as_ref(), 1, "Category required");
        let transaction_type = v.choice::<TransactionType>(
            "type",
            self.transaction_type.as_ref(),
            "Type must be income or expense",
        );
        let date = v.date("date", self.date.as_ref(), "Valid date required");
        v.finish(|| {
            Some(TransactionInput {
                description: description?,
                amount: amount?,
                category: category?,
                transaction_type: transaction_type?,
                date: date?,
            })
        })
    }
}

async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_service.get_transactions(user.user_id)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<TransactionPayload>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let input = payload.validate()?;
    let transaction = state
        .transaction_service
        .create_transaction(user.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<TransactionPayload>,
) -> ApiResult<Json<Transaction>> {
    let input = payload.validate()?;
    let transaction_id = path_id(&id, ENTITY)?;
    let transaction = state
        .transaction_service
        .update_transaction(user.user_id, transaction_id, input)
        .await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<DeletedResponse>> {
    let transaction_id = path_id(&id, ENTITY)?;
    state
        .transaction_service
        .delete_transaction(user.user_id, transaction_id)
        .await?;
    Ok(Json(DeletedResponse::new("Transaction deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(get_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
}
