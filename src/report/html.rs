use std::collections::HashMap;

use crate::input::form::ValidationErrors;
use crate::pipeline::history::PredictionRecord;
use crate::pipeline::predict::PredictionOutcome;
use crate::report::{escape_html, format_f64_2, format_gap, gap_statement};
use crate::schema::Feature;

/// Values to pre-fill and errors to show when the form is rendered again.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormView<'a> {
    pub values: Option<&'a HashMap<String, String>>,
    pub errors: Option<&'a ValidationErrors>,
}

pub fn render_form(view: FormView<'_>) -> String {
    let mut out = String::new();
    push_head(&mut out, "Mission health check");

    out.push_str("<h1>Mission health check</h1>\n");
    if let Some(errors) = view.errors {
        out.push_str("<div class=\"errors\"><p>Please correct the following:</p><ul>\n");
        for err in &errors.0 {
            out.push_str(&format!("<li>{}</li>\n", escape_html(&err.to_string())));
        }
        out.push_str("</ul></div>\n");
    }

    out.push_str("<form method=\"post\" action=\"/predict\">\n");
    let name = prefill(view.values, "name");
    out.push_str(&format!(
        "<label>Name <input type=\"text\" name=\"name\" value=\"{}\" placeholder=\"Astronaut\"></label>\n",
        escape_html(name)
    ));
    for feature in Feature::ALL {
        let invalid = view
            .errors
            .is_some_and(|e| e.message_for(feature).is_some());
        out.push_str(&format!(
            "<label{}>{} ({}) <input type=\"text\" inputmode=\"decimal\" name=\"{}\" value=\"{}\" required></label>\n",
            if invalid { " class=\"invalid\"" } else { "" },
            feature.label(),
            escape_html(feature.unit()),
            feature.key(),
            escape_html(prefill(view.values, feature.key()))
        ));
    }
    out.push_str("<button type=\"submit\">Predict health score</button>\n");
    out.push_str("</form>\n");
    out.push_str("<p><a href=\"/dashboard\">Mission dashboard</a></p>\n");

    push_tail(&mut out);
    out
}

pub fn render_dashboard(images: &[&str], history: &[PredictionRecord]) -> String {
    let mut out = String::new();
    push_head(&mut out, "Mission dashboard");
    out.push_str("<h1>Mission dashboard</h1>\n");
    push_charts(&mut out, images);
    push_history(&mut out, history);
    out.push_str("<p><a href=\"/\">New health check</a></p>\n");
    push_tail(&mut out);
    out
}

pub fn render_prediction(outcome: &PredictionOutcome, images: &[&str]) -> String {
    let mut out = String::new();
    push_head(&mut out, "Health prediction");

    out.push_str(&format!(
        "<h1>Health report for {}</h1>\n",
        escape_html(&outcome.name)
    ));
    out.push_str(&format!(
        "<section class=\"score\"><p>Predicted health score: <strong id=\"score\">{}</strong></p>\n<p>Status: <strong id=\"status\">{}</strong></p></section>\n",
        format_f64_2(outcome.score),
        outcome.status.label()
    ));

    out.push_str("<h2>Readings vs mission averages</h2>\n");
    out.push_str("<table class=\"gaps\">\n<tr><th>Reading</th><th>Value</th><th>Average</th><th>Gap</th><th></th></tr>\n");
    for feature in Feature::ALL {
        let gap = outcome.gaps.get(feature);
        out.push_str(&format!(
            "<tr data-feature=\"{}\"><td>{} ({})</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            feature.key(),
            feature.label(),
            escape_html(feature.unit()),
            format_f64_2(outcome.readings.get(feature)),
            format_f64_2(outcome.baseline.get(feature)),
            format_gap(gap),
            gap_statement(gap)
        ));
    }
    out.push_str("</table>\n");

    push_charts(&mut out, images);
    push_history(&mut out, &outcome.history);
    out.push_str("<p><a href=\"/\">New health check</a></p>\n");
    push_tail(&mut out);
    out
}

pub fn render_error_page(message: &str) -> String {
    let mut out = String::new();
    push_head(&mut out, "Prediction failed");
    out.push_str("<h1>Prediction failed</h1>\n");
    out.push_str(&format!("<p>{}</p>\n", escape_html(message)));
    out.push_str("<p><a href=\"/\">Back to the form</a></p>\n");
    push_tail(&mut out);
    out
}

fn prefill<'a>(values: Option<&'a HashMap<String, String>>, key: &str) -> &'a str {
    values
        .and_then(|v| v.get(key))
        .map(String::as_str)
        .unwrap_or("")
}

fn push_head(out: &mut String, title: &str) {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str("</head>\n<body>\n");
}

fn push_tail(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

fn push_charts(out: &mut String, images: &[&str]) {
    if images.is_empty() {
        return;
    }
    out.push_str("<h2>Exploratory analysis</h2>\n<div class=\"charts\">\n");
    for image in images {
        let image = escape_html(image);
        out.push_str(&format!(
            "<img src=\"/static/{image}\" alt=\"{image}\">\n"
        ));
    }
    out.push_str("</div>\n");
}

fn push_history(out: &mut String, history: &[PredictionRecord]) {
    out.push_str("<h2>Prediction history</h2>\n");
    if history.is_empty() {
        out.push_str("<p class=\"empty\">No predictions yet.</p>\n");
        return;
    }
    out.push_str("<table class=\"history\">\n<tr><th>Date</th><th>Name</th><th>Score</th><th>Status</th></tr>\n");
    for record in history {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&record.timestamp),
            escape_html(&record.name),
            format_f64_2(record.score),
            record.status.label()
        ));
    }
    out.push_str("</table>\n");
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
