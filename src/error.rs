//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! It centralizes error logging and HTTP response generation, eliminating
//! repetitive error handling patterns throughout the codebase.

use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::ScheduleError;

/// Central application error type that encompasses all possible error
/// conditions.
///
/// This enum provides a unified way to handle errors across the application,
/// with automatic conversion to appropriate HTTP responses. _Db errors are
/// logged automatically, while other errors should be logged at the point of
/// creation if needed._
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    message: Cow<'static, str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Db(e) = &self {
            // Log detailed database errors for internal tracking
            error!(?e, "Database error occurred");
        }

        // Central logging - log details for internal errors, minimal for client errors
        let (status, message): (StatusCode, Cow<'static, str>) = match self {
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into()),
            AppError::Schedule(e) => (StatusCode::BAD_REQUEST, e.to_string().into()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.into()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.into()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            ),
        };

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
