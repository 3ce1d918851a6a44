use crate::infra::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use leadership_index::error::AppError;
use leadership_index::scoring::{compute, ScoreInput, ScoreReport};
use serde_json::json;
use tracing::{debug, warn};

/// Path accepting survey submissions.
pub const SCORE_PATH: &str = "/api/score";

/// Largest submission body read in full; anything bigger is scored as empty.
pub(crate) const SCORE_BODY_LIMIT: usize = 2 * 1024 * 1024;

pub(crate) fn scoring_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            SCORE_PATH,
            post(score_endpoint)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(SCORE_BODY_LIMIT)),
        )
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Score the submitted survey. Bodies that cannot be read as a submission,
/// including oversized ones, are scored as an empty one rather than rejected.
pub(crate) async fn score_endpoint(
    body: Result<Bytes, BytesRejection>,
) -> Json<ScoreReport> {
    let input = match body {
        Ok(body) => ScoreInput::from_json_slice(&body).unwrap_or_else(|err| {
            debug!(error = %err, "unreadable score request body; scoring empty submission");
            ScoreInput::default()
        }),
        Err(rejection) => {
            debug!(error = %rejection, "score request body rejected; scoring empty submission");
            ScoreInput::default()
        }
    };

    Json(compute(&input))
}

pub(crate) async fn method_not_allowed(method: Method) -> AppError {
    warn!(%method, path = SCORE_PATH, "rejected score request");
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_score(body: impl Into<Body>) -> Request<Body> {
        Request::post(SCORE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("request builds")
    }

    #[tokio::test]
    async fn score_route_returns_report() {
        let router = scoring_router(AppState::detached(true));
        let payload = json!({
            "email": "sam@example.org",
            "role_level_raw": "Entry level",
            "sector_raw": "Healthcare",
            "selected_competencies_raw": "dm",
            "record_id": "rec42",
            "answers": ["dm_1: 80%", "dm_2: 90%"],
        });

        let response = router
            .oneshot(post_score(
                serde_json::to_vec(&payload).expect("payload serializes"),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["email"], json!("sam@example.org"));
        assert_eq!(body["role_level"], json!("level_entry"));
        assert_eq!(body["sector"], json!("healthcare"));
        assert_eq!(body["selected_competencies"], json!("dm"));
        assert_eq!(body["dm_score_raw"], json!(85));
        assert_eq!(body["dm_score_adj"], json!(94));
        assert_eq!(body["overall_score"], json!(94));
        assert_eq!(body["level_adjustment_used"], json!(1.1));
        assert_eq!(body["record_id"], json!("rec42"));
        assert_eq!(body.as_object().map(|fields| fields.len()), Some(20));
    }

    #[tokio::test]
    async fn score_route_scores_unreadable_body_as_empty() {
        let router = scoring_router(AppState::detached(true));

        let response = router
            .oneshot(post_score("definitely not json"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["role_level"], json!("level_mid"));
        assert_eq!(body["sector"], json!("other"));
        assert_eq!(body["overall_score"], Value::Null);
        assert_eq!(body["email"], json!(""));
    }

    #[tokio::test]
    async fn score_route_ignores_array_bodies() {
        let router = scoring_router(AppState::detached(true));

        let response = router
            .oneshot(post_score(
                r#"["x@y.z", "Entry level", "", "", "", ["dm_1: 80%"]]"#,
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["email"], json!(""));
        assert_eq!(body["role_level"], json!("level_mid"));
        assert_eq!(body["dm_score_raw"], Value::Null);
        assert_eq!(body["overall_score"], Value::Null);
    }

    #[tokio::test]
    async fn score_route_uses_last_value_of_repeated_key() {
        let router = scoring_router(AppState::detached(true));

        let response = router
            .oneshot(post_score(
                r#"{"answers": ["dm_1: 80%"], "role_level_raw": "entry", "answers": ["dm_1: 60%"]}"#,
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["role_level"], json!("level_entry"));
        assert_eq!(body["dm_score_raw"], json!(60));
        assert_eq!(body["dm_score_adj"], json!(66));
    }

    #[tokio::test]
    async fn score_route_scores_oversized_body_as_empty() {
        let router = scoring_router(AppState::detached(true));
        let padding = "x".repeat(SCORE_BODY_LIMIT);
        let payload = json!({
            "role_level_raw": "entry",
            "answers": ["dm_1: 80%"],
            "notes": padding,
        });

        let response = router
            .oneshot(post_score(
                serde_json::to_vec(&payload).expect("payload serializes"),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["role_level"], json!("level_mid"));
        assert_eq!(body["overall_score"], Value::Null);
    }

    #[tokio::test]
    async fn score_route_tolerates_non_array_answers() {
        let router = scoring_router(AppState::detached(true));

        let response = router
            .oneshot(post_score(r#"{"answers": "dm_1: 80%", "role_level_raw": "exec"}"#))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["role_level"], json!("level_exec"));
        assert_eq!(body["dm_score_raw"], Value::Null);
        assert_eq!(body["overall_score"], Value::Null);
    }

    #[tokio::test]
    async fn other_verbs_are_rejected() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let router = scoring_router(AppState::detached(true));
            let request = Request::builder()
                .method(method.clone())
                .uri(SCORE_PATH)
                .body(Body::empty())
                .expect("request builds");

            let response = router.oneshot(request).await.expect("route executes");

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
            let body = read_json_body(response).await;
            assert_eq!(body, json!({ "error": "Method not allowed. Use POST." }));
        }
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let router = scoring_router(AppState::detached(false));
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            read_json_body(response).await,
            json!({ "status": "initializing" })
        );

        let router = scoring_router(AppState::detached(true));
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let router = scoring_router(AppState::detached(true));
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }
}
