pub mod api;
pub mod auth;
pub mod config;
pub mod error;
mod main_lib;
pub mod rate_limit;
pub mod validation;

pub use main_lib::{build_state, init_tracing, AppState};
