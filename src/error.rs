use std::io;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, From};
use serde_json::json;

use crate::{export::ExportError, form::FormError};

#[derive(Debug, Display, From)]
pub enum AppError {
    #[display(fmt = "storage failure: {}", _0)]
    Storage(io::Error),

    #[display(fmt = "serialization failure: {}", _0)]
    Serialization(serde_json::Error),

    #[display(fmt = "{}", _0)]
    Form(FormError),

    #[display(fmt = "export failed: {}", _0)]
    Export(ExportError),

    #[display(fmt = "{} not found", _0)]
    #[from(ignore)]
    NotFound(String),
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Form(e) => e.status_code(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(json!({ "message": message }))
    }
}
