use std::sync::Arc;

use crate::{auth::TokenService, config::Config};
use fintrack_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    crypto::{CryptoService, CryptoServiceTrait},
    summary::{SummaryService, SummaryServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use fintrack_storage_sqlite::{
    budgets::BudgetRepository,
    crypto::CryptoRepository,
    db::{self, write_actor},
    transactions::TransactionRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub crypto_service: Arc<dyn CryptoServiceTrait + Send + Sync>,
    pub summary_service: Arc<dyn SummaryServiceTrait + Send + Sync>,
    pub tokens: Arc<TokenService>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());
    tracing::info!("Database ready at {}", db_path);

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let crypto_repo = Arc::new(CryptoRepository::new(pool.clone(), writer));

    let user_service = Arc::new(UserService::new(user_repo));
    let budget_service = Arc::new(BudgetService::new(budget_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo.clone()));
    let crypto_service = Arc::new(CryptoService::new(crypto_repo.clone()));
    let summary_service = Arc::new(SummaryService::new(
        budget_repo,
        transaction_repo,
        crypto_repo,
    ));

    let tokens = Arc::new(TokenService::from_config(config.jwt_secret.as_deref())?);

    Ok(Arc::new(AppState {
        user_service,
        budget_service,
        transaction_service,
        crypto_service,
        summary_service,
        tokens,
    }))
}
