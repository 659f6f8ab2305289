use fintrack_core::errors::Error as CoreError;
use serde::Serialize;

use crate::{error::ApiError, validation::parse_id};

#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

impl DeletedResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Resolves a path id; ids no row can have are reported as missing `entity`.
pub fn path_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or_else(|| CoreError::NotFound(entity.to_string()).into())
}
