//! Service error surface.
//!
//! Leaf modules return `anyhow::Result`; handlers translate into
//! [`ServiceError`] at the HTTP boundary, where each variant carries a
//! stable machine code and status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Unreadable upload: {message}")]
    UnreadableInput { message: String },

    #[error("{service} failure: {message}")]
    Upstream { service: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn unreadable_input(message: impl Into<String>) -> Self {
        Self::UnreadableInput {
            message: message.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UnreadableInput { .. } => "UNREADABLE_INPUT",
            Self::Upstream { .. } => "UPSTREAM_FAILURE",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UnreadableInput { .. } => StatusCode::BAD_REQUEST,
            // Engine failures propagate directly; nothing retries them.
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body every error response carries.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}
