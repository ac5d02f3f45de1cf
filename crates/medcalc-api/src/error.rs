use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use medcalc_calculators::error::CalculatorError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Field validation blocked the calculation.
    Invalid {
        alert: String,
        errors: BTreeMap<String, String>,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct InvalidBody {
    alert: String,
    errors: BTreeMap<String, String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Invalid { alert, errors } => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(InvalidBody { alert, errors }),
                )
                    .into_response();
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CalculatorError> for ApiError {
    fn from(e: CalculatorError) -> Self {
        match e {
            CalculatorError::UnknownCalculator(id) => {
                ApiError::NotFound(format!("calculator not found: {id}"))
            }
            unknown @ CalculatorError::UnknownField { .. } => {
                ApiError::BadRequest(unknown.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
