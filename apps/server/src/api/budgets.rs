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
use fintrack_core::budgets::{Budget, BudgetInput, BudgetPeriod};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

const ENTITY: &str = "Budget";

#[derive(Deserialize)]
struct BudgetPayload {
    category: Option<Value>,
    amount: Option<Value>,
    period: Option<Value>,
}

impl BudgetPayload {
    fn validate(self) -> ApiResult<BudgetInput> {
        let mut v = Validator::new();
        let category = v.text("category", self.category.as_ref(), 1, "Category required");
        let amount = v.decimal(
            "amount",
            self.amount.as_ref(),
            Some(Decimal::ZERO),
            "Valid amount required",
        );
        let period = v.choice::<BudgetPeriod>("period", self.period.as_ref(), "Valid period required");
        v.finish(|| {
            Some(BudgetInput {
                category: category?,
                amount: amount?,
                period: period?,
            })
        })
    }
}

async fn get_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.get_budgets(user.user_id)?;
    Ok(Json(budgets))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<BudgetPayload>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let input = payload.validate()?;
    let budget = state.budget_service.create_budget(user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<BudgetPayload>,
) -> ApiResult<Json<Budget>> {
    let input = payload.validate()?;
    let budget_id = path_id(&id, ENTITY)?;
    let budget = state
        .budget_service
        .update_budget(user.user_id, budget_id, input)
        .await?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<DeletedResponse>> {
    let budget_id = path_id(&id, ENTITY)?;
    state
        .budget_service
        .delete_budget(user.user_id, budget_id)
        .await?;
    Ok(Json(DeletedResponse::new("Budget deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(get_budgets).post(create_budget))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}
