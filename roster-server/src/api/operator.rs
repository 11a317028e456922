//! Operator extractor
//!
//! The gateway in front of this service authenticates the caller and
//! forwards its id in `x-operator-id`. The value ends up in the
//! `created_by` stamp of new assignments.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::scheduling::SYSTEM_OPERATOR;
use crate::utils::AppError;
use crate::utils::validation::MAX_SHORT_TEXT_LEN;

pub const OPERATOR_HEADER: &str = "x-operator-id";

/// Who triggered the request, `system` when unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator(pub String);

impl Operator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(OPERATOR_HEADER) else {
            return Ok(Operator(SYSTEM_OPERATOR.to_string()));
        };
        let value = raw
            .to_str()
            .map_err(|_| AppError::invalid_request(format!("{OPERATOR_HEADER} is not valid text")))?
            .trim();
        if value.is_empty() {
            return Ok(Operator(SYSTEM_OPERATOR.to_string()));
        }
        if value.len() > MAX_SHORT_TEXT_LEN {
            return Err(AppError::invalid_request(format!(
                "{OPERATOR_HEADER} is too long (max {MAX_SHORT_TEXT_LEN})"
            )));
        }
        Ok(Operator(value.to_string()))
    }
}
