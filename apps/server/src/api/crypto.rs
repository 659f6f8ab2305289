use std::sync::Arc;

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    validation::{AppJson, Validator},
};
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use fintrack_core::crypto::{CryptoHolding, CryptoPrices, NewCryptoHolding};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct HoldingPayload {
    symbol: Option<Value>,
    amount: Option<Value>,
    purchase_price: Option<Value>,
}

async fn get_holdings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<CryptoHolding>>> {
    let holdings = state.crypto_service.get_holdings(user.user_id)?;
    Ok(Json(holdings))
}

async fn add_holding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(payload): AppJson<HoldingPayload>,
) -> ApiResult<(StatusCode, Json<CryptoHolding>)> {
    let mut v = Validator::new();
    let symbol = v.text("symbol", payload.symbol.as_ref(), 1, "Symbol required");
    let amount = v.decimal(
        "amount",
        payload.amount.as_ref(),
        Some(Decimal::ZERO),
        "Valid amount required",
    );
    let purchase_price = v.decimal(
        "purchase_price",
        payload.purchase_price.as_ref(),
        Some(Decimal::ZERO),
        "Valid purchase price required",
    );
    let new_holding = v.finish(|| {
        Some(NewCryptoHolding {
            symbol: symbol?,
            amount: amount?,
            purchase_price: purchase_price?,
        })
    })?;

    let holding = state
        .crypto_service
        .add_holding(user.user_id, new_holding)
        .await?;
    Ok((StatusCode::CREATED, Json(holding)))
}

async fn get_prices(State(state): State<Arc<AppState>>) -> Json<CryptoPrices> {
    Json(state.crypto_service.get_prices())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/crypto", get(get_holdings).post(add_holding))
}

/// The price table is readable without a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new().route("/crypto/prices", get(get_prices))
}
