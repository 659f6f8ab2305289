//! Dashboard summary - aggregates over a user's ledger.

mod summary_model;
mod summary_service;

pub use summary_model::DashboardSummary;
pub use summary_service::{summarize, SummaryService, SummaryServiceTrait};
