use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    /// Named resource missing, or fundamentally data-less (e.g. an event
    /// with no attendance list). Carries the client-facing detail message.
    NotFound(String),
    /// Malformed request parameter (bad year, bad id).
    InvalidParameter(String),
    /// Field-level validation failure; serialized as {"<field>": message}.
    Validation { field: String, message: String },
    Unauthorized(String),
    Forbidden(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::NotFound(detail) => write!(f, "Not found: {detail}"),
            AppError::InvalidParameter(detail) => write!(f, "Invalid parameter: {detail}"),
            AppError::Validation { field, message } => write!(f, "Validation ({field}): {message}"),
            AppError::Unauthorized(detail) => write!(f, "Unauthorized: {detail}"),
            AppError::Forbidden(detail) => write!(f, "Forbidden: {detail}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(detail) => {
                HttpResponse::NotFound().json(json!({ "detail": detail }))
            }
            AppError::InvalidParameter(detail) => {
                HttpResponse::BadRequest().json(json!({ "detail": detail }))
            }
            AppError::Validation { field, message } => {
                let mut body = serde_json::Map::new();
                body.insert(field.clone(), json!(message));
                HttpResponse::BadRequest().json(serde_json::Value::Object(body))
            }
            AppError::Unauthorized(detail) => {
                HttpResponse::Unauthorized().json(json!({ "detail": detail }))
            }
            AppError::Forbidden(detail) => {
                HttpResponse::Forbidden().json(json!({ "detail": detail }))
            }
            AppError::Db(e) => {
                log::error!("{e}");
                HttpResponse::InternalServerError()
                    .json(json!({ "detail": "Error interno del servidor." }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}
