//! # HTTP API
//!
//! JSON front end for the browser UI. Same operations as the console, over
//! the same [`TripStore`] and [`ReportGenerator`].
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET   /health                       liveness, "OK"                     │
//! │  POST  /api/fares/estimate           FareRequest → FareBreakdown        │
//! │  POST  /api/trips                    NewTrip → 201 Trip                 │
//! │  GET   /api/trips                    [Trip]                             │
//! │  GET   /api/drivers/earnings         [DriverEarnings]                   │
//! │  GET   /api/reports/overall          OverallReportResponse              │
//! │  GET   /api/reports/drivers/{name}   DriverReportResponse               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are `{ "code": ..., "message": ... }` (see [`ApiError`]).

use axum::extract::{Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use cabfare_core::{
    DriverEarnings, DriverReport, FareBreakdown, FareRequest, NewTrip, OverallReport, Trip,
};
use cabfare_db::{ReportGenerator, TripStore};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use ts_rs::TS;

use crate::error::{ApiError, AppError};

/// Services shared by every request.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub store: TripStore,
    pub reports: ReportGenerator,
}

type SharedState = Arc<ApiState>;

// =============================================================================
// Response Envelopes
// =============================================================================

/// `GET /api/reports/overall`
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverallReportResponse {
    /// No trips are stored yet.
    NoData,
    Ok { report: OverallReport },
}

/// `GET /api/reports/drivers/{name}`
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DriverReportResponse {
    /// The driver has no trips.
    NotFound,
    Ok { report: DriverReport },
}

// =============================================================================
// Router
// =============================================================================

/// Builds the API router with CORS and request tracing.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/fares/estimate", post(estimate_fare))
        .route("/api/trips", get(list_trips).post(create_trip))
        .route("/api/drivers/earnings", get(driver_earnings))
        .route("/api/reports/overall", get(overall_report))
        .route("/api/reports/drivers/{name}", get(driver_report))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serves the API on `addr` until Ctrl+C.
pub async fn serve(addr: &str, state: ApiState) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("🚖 Fare API listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!("Fare API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// =============================================================================
// Handlers
// =============================================================================

async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn estimate_fare(
    State(state): State<SharedState>,
    Json(request): Json<FareRequest>,
) -> Result<Json<FareBreakdown>, ApiError> {
    Ok(Json(state.store.estimate(&request)?))
}

async fn create_trip(
    State(state): State<SharedState>,
    Json(new_trip): Json<NewTrip>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    let trip = state.store.create_trip(new_trip).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn list_trips(State(state): State<SharedState>) -> Result<Json<Vec<Trip>>, ApiError> {
    Ok(Json(state.store.list_trips().await?))
}

async fn driver_earnings(
    State(state): State<SharedState>,
) -> Result<Json<Vec<DriverEarnings>>, ApiError> {
    Ok(Json(state.reports.driver_earnings().await?))
}

async fn overall_report(
    State(state): State<SharedState>,
) -> Result<Json<OverallReportResponse>, ApiError> {
    let response = match state.reports.overall_report().await? {
        Some(report) => OverallReportResponse::Ok { report },
        None => OverallReportResponse::NoData,
    };
    Ok(Json(response))
}

async fn driver_report(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<DriverReportResponse>, ApiError> {
    let response = match state.reports.driver_report(&name).await? {
        Some(report) => DriverReportResponse::Ok { report },
        None => DriverReportResponse::NotFound,
    };
    Ok(Json(response))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use cabfare_core::{FareCalculator, Money};
    use cabfare_db::{Database, DbConfig};

    async fn state() -> SharedState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Arc::new(ApiState {
            store: TripStore::new(db.trips(), FareCalculator::default()),
            reports: ReportGenerator::new(db.trips()),
        })
    }

    fn booking(driver: &str, promo: Option<&str>) -> NewTrip {
        let mut request = FareRequest::new(10.0, 15.0, "heavy", "Sunday", 19);
        if let Some(code) = promo {
            request = request.with_promo(code);
        }
        NewTrip::new(driver, request)
    }

    #[tokio::test]
    async fn test_estimate_returns_breakdown() {
        let state = state().await;

        let Json(breakdown) = estimate_fare(
            State(state.clone()),
            Json(FareRequest::new(10.0, 15.0, "heavy", "Sunday", 19)),
        )
        .await
        .unwrap();

        assert_eq!(breakdown.total(), Money::from_cents(34500));
        assert_eq!(breakdown.subtotal_cents, 20000);

        let Json(trips) = list_trips(State(state)).await.unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn test_create_trip_returns_created() {
        let state = state().await;

        let (status, Json(trip)) = create_trip(State(state.clone()), Json(booking("Asha", None)))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(trip.id, 1);
        assert_eq!(trip.fare(), Money::from_cents(34500));

        let Json(trips) = list_trips(State(state)).await.unwrap();
        assert_eq!(trips, vec![trip]);
    }

    #[tokio::test]
    async fn test_create_trip_rejects_invalid_input() {
        let state = state().await;

        let err = create_trip(State(state), Json(booking("  ", None)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "driver is required");
    }

    #[tokio::test]
    async fn test_reports_before_and_after_booking() {
        let state = state().await;

        let Json(overall) = overall_report(State(state.clone())).await.unwrap();
        assert_eq!(overall, OverallReportResponse::NoData);

        let Json(driver) = driver_report(State(state.clone()), Path("Asha".to_string()))
            .await
            .unwrap();
        assert_eq!(driver, DriverReportResponse::NotFound);

        create_trip(State(state.clone()), Json(booking("Asha", None)))
            .await
            .unwrap();
        create_trip(State(state.clone()), Json(booking("Asha", Some("NEW50"))))
            .await
            .unwrap();

        let Json(overall) = overall_report(State(state.clone())).await.unwrap();
        match overall {
            OverallReportResponse::Ok { report } => {
                assert_eq!(report.trip_count, 2);
                assert_eq!(report.total_fare(), Money::from_cents(64000));
            }
            other => panic!("expected a report, got {:?}", other),
        }

        let Json(driver) = driver_report(State(state.clone()), Path("Asha".to_string()))
            .await
            .unwrap();
        match driver {
            DriverReportResponse::Ok { report } => {
                assert_eq!(report.trip_count, 2);
                assert_eq!(report.average_fare(), Money::from_cents(32000));
            }
            other => panic!("expected a report, got {:?}", other),
        }

        let Json(earnings) = driver_earnings(State(state)).await.unwrap();
        assert_eq!(earnings.len(), 1);
        assert_eq!(earnings[0].total_fare(), Money::from_cents(64000));
    }

    #[test]
    fn test_report_envelope_shape() {
        let json = serde_json::to_value(OverallReportResponse::NoData).unwrap();
        assert_eq!(json, serde_json::json!({"status": "no_data"}));

        let json = serde_json::to_value(DriverReportResponse::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({"status": "not_found"}));
    }

    #[tokio::test]
    async fn test_router_builds() {
        let state = state().await;
        let _router = router(ApiState::clone(&state));
    }
}
