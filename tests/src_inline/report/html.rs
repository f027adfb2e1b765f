use super::*;
use crate::input::form::parse_submission;
use crate::model::HealthStatus;
use crate::report::CHART_IMAGES;
use crate::schema::FeatureVector;

fn record(name: &str, score: f64) -> PredictionRecord {
    PredictionRecord {
        name: name.to_string(),
        score,
        status: HealthStatus::Stable,
        timestamp: "2026-10-17 08:00:00".to_string(),
        readings: FeatureVector::default(),
    }
}

#[test]
fn test_form_has_every_schema_field() {
    let html = render_form(FormView::default());
    assert!(html.contains("action=\"/predict\""));
    assert!(html.contains("name=\"name\""));
    for feature in Feature::ALL {
        assert!(html.contains(&format!("name=\"{}\"", feature.key())));
    }
    assert!(!html.contains("class=\"errors\""));
}

#[test]
fn test_form_shows_errors_and_keeps_values() {
    let mut values = HashMap::new();
    values.insert("name".to_string(), "<Alex>".to_string());
    values.insert("radiation".to_string(), "high".to_string());
    let errors = parse_submission(&values).unwrap_err();
    let html = render_form(FormView {
        values: Some(&values),
        errors: Some(&errors),
    });
    assert!(html.contains("class=\"errors\""));
    assert!(html.contains("Radiation exposure must be a number"));
    assert!(html.contains("value=\"&lt;Alex&gt;\""));
    assert!(html.contains("value=\"high\""));
    assert!(!html.contains("<Alex>"));
}

#[test]
fn test_dashboard_lists_charts_and_history() {
    let history = vec![record("Sam", 64.0), record("Alex", 88.123)];
    let html = render_dashboard(&CHART_IMAGES, &history);
    for image in CHART_IMAGES {
        assert!(html.contains(&format!("/static/{image}")));
    }
    let sam = html.find("<td>Sam</td>").unwrap();
    let alex = html.find("<td>Alex</td>").unwrap();
    assert!(sam < alex);
    assert!(html.contains("<td>88.12</td>"));
}

#[test]
fn test_empty_history_message() {
    let html = render_dashboard(&CHART_IMAGES, &[]);
    assert!(html.contains("No predictions yet."));
}

#[test]
fn test_prediction_page_lists_gaps() {
    let readings = FeatureVector::from_fn(|f| f.index() as f64 + 1.0);
    let baseline = FeatureVector::from_fn(|_| 1.0);
    let outcome = PredictionOutcome {
        name: "Alex".to_string(),
        score: 72.5,
        status: HealthStatus::Stable,
        readings,
        baseline,
        gaps: readings.minus(&baseline),
        history: vec![record("Alex", 72.5)],
    };
    let html = render_prediction(&outcome, &CHART_IMAGES);
    assert!(html.contains("<strong id=\"score\">72.50</strong>"));
    assert!(html.contains("<strong id=\"status\">Stable</strong>"));
    assert!(html.contains("data-feature=\"respiration_rate\""));
    assert!(html.contains("<td>+9.00</td><td>above mission average</td>"));
    assert!(html.contains("<td>0.00</td><td>at mission average</td>"));
}

#[test]
fn test_error_page_escapes_message() {
    let html = render_error_page("model said <nan>");
    assert!(html.contains("model said &lt;nan&gt;"));
}
