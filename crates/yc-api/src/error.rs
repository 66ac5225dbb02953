//! # ApiError
//!
//! The single place where a failed request becomes a response. Handlers
//! return `Result<_, ApiError>` and let `?` carry any failure here.

use std::fmt;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use yc_core::error::AppError;
use yc_ui::ErrorTemplate;

#[derive(Debug)]
pub struct ApiError(pub AppError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(AppError::from(err))
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        Self(AppError::Internal(format!("template rendering failed: {err}")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match &self.0 {
            AppError::Internal(detail) => log::error!("{detail}"),
            other => log::debug!("{status}: {other}"),
        }

        let message = self.0.public_message();
        let title = status.canonical_reason().unwrap_or("Error");
        let page = ErrorTemplate {
            title,
            flashes: &[],
            status: status.as_u16(),
            message: &message,
        };

        match page.render() {
            Ok(html) => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(html),
            Err(err) => {
                log::error!("error page failed to render: {err}");
                HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(message)
            }
        }
    }
}
