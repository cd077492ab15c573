use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("minimum delay {min:?} exceeds maximum delay {max:?}")]
    InvalidDelay { min: Duration, max: Duration },

    #[error("frontend origin is not a valid header value: {0:?}")]
    InvalidOrigin(String),
}

/// One entry of a 422 `detail` list: where the request went wrong, and how.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub loc: Vec<&'static str>,
    pub msg: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ValidationIssue {
    pub fn missing(loc: Vec<&'static str>) -> Self {
        ValidationIssue {
            loc,
            msg: "Field required",
            kind: "missing",
        }
    }

    pub fn json_invalid() -> Self {
        ValidationIssue {
            loc: vec!["body"],
            msg: "JSON decode error",
            kind: "json_invalid",
        }
    }

    pub fn not_an_object() -> Self {
        ValidationIssue {
            loc: vec!["body"],
            msg: "Input should be a valid dictionary or object to extract fields from",
            kind: "model_attributes_type",
        }
    }

    pub fn not_a_string(loc: Vec<&'static str>) -> Self {
        ValidationIssue {
            loc,
            msg: "Input should be a valid string",
            kind: "string_type",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request validation failed: {0:?}")]
    Validation(Vec<ValidationIssue>),

    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ValidationIssue> for ApiError {
    fn from(issue: ValidationIssue) -> Self {
        ApiError::Validation(vec![issue])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(issues) => json!({ "detail": issues }),
            ApiError::NotFound => json!({ "detail": "Not Found" }),
        };
        (status, Json(body)).into_response()
    }
}
