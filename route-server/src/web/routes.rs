//! HTTP route handlers.

use std::any::Any;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{PlanError, Planner, RouteResponse};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes", post(plan_routes))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan taxi and transit routes between two points.
async fn plan_routes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    // Parse JSON manually so the rejected body can be logged
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = req.into_route_request(Local::now().fixed_offset())?;

    let planner = Planner::new(state.providers.as_ref(), &state.config);
    let response = planner.plan(&request).await?;

    Ok(Json(response))
}

/// Turn a handler panic into the usual JSON error shape.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");

    AppError::Internal {
        message: "internal server error".to_string(),
    }
    .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            PlanError::ProvidersUnavailable => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::planner::PlannerConfig;
    use crate::providers::FixtureProviders;

    const SCENARIO: &str = r#"{
        "driving": {
            "127.0,37.5->127.1,37.6": {"durationSec": 1500, "distanceM": 14000, "taxiFareKrw": 15000}
        }
    }"#;

    fn state(config: PlannerConfig) -> AppState {
        let fixture = FixtureProviders::from_json(SCENARIO).unwrap();
        AppState::new(fixture.into(), &CacheConfig::default(), config)
    }

    fn body(origin: (f64, f64), destination: (f64, f64)) -> Bytes {
        Bytes::from(format!(
            r#"{{"origin": {{"name": "A", "lat": {}, "lng": {}}},
                "destination": {{"name": "B", "lat": {}, "lng": {}}},
                "maxTimeMin": 40, "maxWalkMin": 10,
                "departureTime": "2024-05-01T08:00:00+09:00"}}"#,
            origin.1, origin.0, destination.1, destination.0
        ))
    }

    async fn error_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn short_trip_is_a_walk() {
        let Json(response) = plan_routes(
            State(state(PlannerConfig::default())),
            body((127.0, 37.5), (127.003, 37.5)),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.count, 1);
        assert_eq!(response.routes[0].id(), "walk-only");
        assert!(response.debug.is_none());
    }

    #[tokio::test]
    async fn taxi_route_from_fixture() {
        let Json(response) = plan_routes(
            State(state(PlannerConfig::default().with_debug(true))),
            body((127.0, 37.5), (127.1, 37.6)),
        )
        .await
        .unwrap();

        assert!(!response.no_feasible_route);
        assert_eq!(response.routes[0].id(), "taxi-only");
        assert_eq!(response.routes[0].total_time_min(), 27);
        assert_eq!(response.routes[0].total_cost_krw(), 15000);
        assert!(response.routes[0].arrival_time().is_some());

        let debug = response.debug.unwrap();
        assert!(!debug.taxi_unavailable);
        assert_eq!(debug.transit_itineraries, 0);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let err = plan_routes(
            State(state(PlannerConfig::default())),
            Bytes::from_static(b"{not json"),
        )
        .await
        .unwrap_err();

        let (status, json) = error_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn missing_constraint_is_bad_request() {
        let err = plan_routes(
            State(state(PlannerConfig::default())),
            Bytes::from_static(
                br#"{"origin": {"lat": 37.5, "lng": 127.0}, "destination": {"lat": 37.6, "lng": 127.1}, "maxTimeMin": 30}"#,
            ),
        )
        .await
        .unwrap_err();

        let (status, json) = error_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "missing required field: maxWalkMin");
    }

    #[tokio::test]
    async fn plan_errors_map_to_statuses() {
        let (status, _) = error_json(PlanError::InvalidRequest("bad".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = error_json(PlanError::ProvidersUnavailable.into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], PlanError::ProvidersUnavailable.to_string());
    }

    #[tokio::test]
    async fn panics_become_json_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "internal server error");
    }
}
