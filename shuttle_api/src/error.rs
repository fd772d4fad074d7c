use aide::OperationIo;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::Serialize;
use shuttle_dispatch::error::DispatchError;
use tracing::error;

pub const STATUS_ERROR: &str = "error";

#[derive(Serialize, JsonSchema, Debug)]
pub struct ErrorBody {
    pub status: String,
    pub error: String,
    pub details: Option<String>,
}

#[derive(Debug, OperationIo)]
#[aide(output_with = "Json<ErrorBody>")]
pub enum ApiError {
    BadRequest(String),
    BadGateway { error: String, details: Option<String> },
    InternalServerError(String),
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Validation(error) => ApiError::BadRequest(error.to_string()),
            DispatchError::Solver(error) => {
                error!(
                    status = ?error.status_code(),
                    details = error.details(),
                    "Route optimization failed: {}",
                    error
                );

                ApiError::BadGateway {
                    error: error.to_string(),
                    details: error.details().map(str::to_owned),
                }
            }
            other => {
                error!("Dispatch failed: {}", other);
                ApiError::InternalServerError(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, String::from("Invalid request"), Some(message))
            }
            ApiError::BadGateway { error, details } => {
                (StatusCode::BAD_GATEWAY, error, details)
            }
            ApiError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
                Some(message),
            ),
        };

        let body = ErrorBody {
            status: STATUS_ERROR.to_owned(),
            error,
            details,
        };

        (status, Json(body)).into_response()
    }
}
