use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use super::*;
use crate::model::LinearModel;
use crate::schema::{Feature, FeatureVector};

fn baseline_means() -> FeatureVector {
    FeatureVector::new([16.0, 250.0, 2.5, 0.25, 120.0, 98.0, 7.5, 80.0, 22.0, 7.0])
}

fn test_state() -> Arc<AppState> {
    let baseline = Baseline {
        rows: 50,
        means: baseline_means(),
    };
    let model = LinearModel {
        intercept: 40.0,
        coefficients: vec![0.0, 0.0, 2.0, -10.0, 0.0, 0.25, 1.0, 0.0, 0.0, 1.0],
    };
    Arc::new(AppState::new(baseline, Box::new(model), HistoryStore::unbounded()))
}

fn app(state: &Arc<AppState>) -> Router {
    let static_dir = std::env::temp_dir().join("astrohealth-static-missing");
    build_router(Arc::clone(state), static_dir)
}

fn form_body(name: Option<&str>, values: &FeatureVector, skip: Option<Feature>) -> String {
    let mut parts = Vec::new();
    if let Some(name) = name {
        parts.push(format!("name={name}"));
    }
    for (feature, value) in values.iter() {
        if Some(feature) == skip {
            continue;
        }
        parts.push(format!("{}={}", feature.key(), value));
    }
    parts.join("&")
}

fn post_form(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_form_routes() {
    let state = test_state();
    for uri in ["/", "/predict"] {
        let res = app(&state).oneshot(get(uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("action=\"/predict\""));
    }
}

#[tokio::test]
async fn test_dashboard_get_and_post() {
    let state = test_state();
    let res = app(&state).oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("/static/correlation_heatmap.png"));
    assert!(html.contains("No predictions yet."));

    let res = app(&state)
        .oneshot(post_form("/dashboard", String::new()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_predict_at_baseline() {
    let state = test_state();
    let body = form_body(Some("Alex"), &baseline_means(), None);
    let res = app(&state).oneshot(post_form("/predict", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;

    // 40 + 2*2.5 - 10*0.25 + 0.25*98 + 7.5 + 7 = 81.5
    assert!(html.contains("<strong id=\"score\">81.50</strong>"));
    assert!(html.contains("<strong id=\"status\">Optimal</strong>"));
    assert_eq!(html.matches("<td>at mission average</td>").count(), 10);

    let history = state.history.snapshot();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name, "Alex");
    assert_eq!(history[0].score, 81.5);
}

#[tokio::test]
async fn test_sequential_predictions_show_newest_first() {
    let state = test_state();
    for name in ["Alex", "Sam"] {
        let body = form_body(Some(name), &baseline_means(), None);
        let res = app(&state).oneshot(post_form("/predict", body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
    let history = state.history.snapshot();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].name, "Sam");

    let html = body_text(app(&state).oneshot(get("/dashboard")).await.unwrap()).await;
    assert!(html.find("<td>Sam</td>").unwrap() < html.find("<td>Alex</td>").unwrap());
}

#[tokio::test]
async fn test_missing_field_is_rejected_without_record() {
    let state = test_state();
    let body = form_body(Some("Alex"), &baseline_means(), Some(Feature::WaterIntake));
    let res = app(&state).oneshot(post_form("/predict", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains("Water intake is required"));
    assert!(html.contains("value=\"Alex\""));
    assert!(state.history.snapshot().is_empty());
}

#[tokio::test]
async fn test_non_numeric_field_is_rejected() {
    let state = test_state();
    let body = form_body(None, &baseline_means(), None).replace("mood_score=7", "mood_score=happy");
    let res = app(&state).oneshot(post_form("/predict", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains("Mood score must be a number"));
    assert!(state.history.snapshot().is_empty());
}

#[tokio::test]
async fn test_body_without_form_content_type_gets_form_page() {
    let state = test_state();
    let body = form_body(Some("Alex"), &baseline_means(), None);
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(body))
        .unwrap();
    let res = app(&state).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains("action=\"/predict\""));
    assert!(html.contains("Oxygen level is required"));
    assert!(state.history.snapshot().is_empty());
}

#[tokio::test]
async fn test_default_name_is_used() {
    let state = test_state();
    let body = form_body(None, &baseline_means(), None);
    let res = app(&state).oneshot(post_form("/predict", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(state.history.snapshot()[0].name, "Astronaut");
}

#[tokio::test]
async fn test_api_endpoints() {
    let state = test_state();
    let body = form_body(Some("Alex"), &baseline_means(), None);
    app(&state).oneshot(post_form("/predict", body)).await.unwrap();

    let res = app(&state).oneshot(get("/api/history")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
    assert_eq!(value["count"], 1);
    assert!(value["capacity"].is_null());
    assert_eq!(value["records"][0]["name"], "Alex");
    assert_eq!(value["records"][0]["readings"]["oxygen_level"], 98.0);

    let res = app(&state).oneshot(get("/api/baseline")).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
    assert_eq!(value["rows"], 50);
    assert_eq!(value["features"][5]["key"], "oxygen_level");

    let res = app(&state).oneshot(get("/health")).await.unwrap();
    assert_eq!(body_text(res).await, "ok");
}
