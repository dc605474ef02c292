use crate::services::{catalog_service::CatalogError, link_service::SignError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

pub const DATABASE_ERROR_BODY: &str = "Database error";
pub const SIGNING_ERROR_BODY: &str = "Error generating signed URL";

/// A lightweight wrapper for request errors. Only `message` reaches the client.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

// Causes are logged here and dropped; callers only ever see the generic body.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        tracing::error!(error = %err, "product query failed");
        AppError::internal(DATABASE_ERROR_BODY)
    }
}

impl From<SignError> for AppError {
    fn from(err: SignError) -> Self {
        tracing::error!(error = %err, "signed URL generation failed");
        AppError::internal(SIGNING_ERROR_BODY)
    }
}
