use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::input::form::ValidationErrors;
use crate::pipeline::predict::PredictError;
use crate::report::html::{FormView, render_error_page, render_form};

/// Request-level failures and how they surface to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid submission: {errors}")]
    Validation {
        values: HashMap<String, String>,
        errors: ValidationErrors,
    },
    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { values, errors } => {
                tracing::info!(%errors, "rejected submission");
                let body = render_form(FormView {
                    values: Some(&values),
                    errors: Some(&errors),
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
            }
            AppError::Predict(err) => {
                tracing::error!(error = %err, "prediction failed");
                let body = render_error_page(&err.to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}
