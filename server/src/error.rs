//! Service errors and their HTTP rendering.
//!
//! Every failure leaves the handler as `{"error": "<message>"}`. Store
//! failures other than not-found are logged with their cause and rendered
//! with a fixed per-operation message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing input, detected before the store is touched.
    #[error("{0}")]
    Validation(&'static str),

    #[error("Todo not found")]
    NotFound,

    /// Any other persistence failure. `message` is what the client sees.
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    /// Classifies a store failure; `message` is used for everything except
    /// not-found.
    pub fn from_store(message: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
            source => Self::Store { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let Self::Store { message, source } = &self {
            error!(error = %source, "{message}");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
