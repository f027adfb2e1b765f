use std::collections::HashMap;
use std::sync::Arc;

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::Html;

use crate::input::form::parse_submission;
use crate::pipeline::predict::{PredictContext, run_prediction};
use crate::report::html::{FormView, render_dashboard, render_form, render_prediction};
use crate::report::json::{BaselineSummary, HistoryPage, baseline_summary, history_page};
use crate::server::AppState;
use crate::server::error::AppError;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn form_page() -> Html<String> {
    Html(render_form(FormView::default()))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let history = state.history.snapshot();
    Html(render_dashboard(state.images, &history))
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    // An unreadable body is treated as an empty form so every field is reported.
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::info!(%rejection, "unreadable form body");
            HashMap::new()
        }
    };
    let submission = match parse_submission(&fields) {
        Ok(s) => s,
        Err(errors) => {
            return Err(AppError::Validation {
                values: fields,
                errors,
            });
        }
    };

    let outcome = run_prediction(state.predict_context(), submission)?;
    Ok(Html(render_prediction(&outcome, state.images)))
}

pub async fn api_history(State(state): State<Arc<AppState>>) -> Json<HistoryPage> {
    let capacity = state.history.capacity().map(|c| c.get());
    Json(history_page(state.history.snapshot(), capacity))
}

pub async fn api_baseline(State(state): State<Arc<AppState>>) -> Json<BaselineSummary> {
    Json(baseline_summary(&state.baseline))
}
