//! Errores de la capa HTTP y su traducción a códigos de estado.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chem_domain::DomainError;
use log::error;
use serde::Serialize;
use thiserror::Error;

/// Cuerpo de error: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// El detalle real ya se registró; al cliente solo le llega el mensaje fijo.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Traduce un error de dominio; `context` es el mensaje que recibe el
    /// cliente si la causa es de almacenamiento.
    pub fn from_domain(err: DomainError, context: &'static str) -> Self {
        match err {
            DomainError::InvalidInput(msg) => Self::BadRequest(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::StorageFailure(msg) => {
                error!("{}: {}", context, msg);
                Self::Internal(context)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
