//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::{TripId, TripPayload, TripRecord};
use crate::geocode::{search_destination, suggest_places};
use crate::pricing::estimate_cost;
use crate::store::{StoreError, TripStore};
use crate::wizard::{Clock, LocalClock, UtcClock};

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

/// Create the application router.
///
/// Unknown `/api` paths get a JSON 404; everything else is served from
/// `static_dir`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/test", get(api_test))
        .route("/trips", post(create_trip).get(list_trips).delete(delete_all_trips))
        .route("/trips/export", get(export_trips))
        .route("/trips/:id", delete(delete_trip))
        .route("/estimate", post(estimate))
        .route("/places/suggest", get(suggest))
        .route("/places/search", get(search))
        .route("/places/reverse", get(reverse))
        .fallback(api_not_found);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn api_test() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API is working".to_string(),
    })
}

async fn api_not_found() -> AppError {
    AppError::not_found("API endpoint not found")
}

/// Run a store operation off the async runtime.
async fn with_store<T, F>(store: &Arc<dyn TripStore>, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&dyn TripStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("store task failed: {}", e),
        })?;
    Ok(result?)
}

/// Save a trip, filling in defaults for anything missing.
///
/// Default timestamps are UTC, like `created_at`.
async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<TripPayload>,
) -> Result<Json<TripCreatedResponse>, AppError> {
    let trip = payload.resolve(UtcClock.now(), &mut rand::thread_rng());
    let id = with_store(&state.store, move |store| store.create(trip)).await?;

    tracing::info!(%id, "trip saved");

    Ok(Json(TripCreatedResponse {
        id,
        message: "Trip saved successfully".to_string(),
    }))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<TripRecord>>, AppError> {
    let trips = with_store(&state.store, |store| store.list()).await?;
    Ok(Json(trips))
}

/// Every trip as a downloadable JSON file.
async fn export_trips(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let trips = with_store(&state.store, |store| store.list()).await?;
    let export = TripExport {
        trips,
        export_date: Utc::now(),
    };
    let disposition = format!("attachment; filename=\"{}\"", export.file_name());

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}

async fn delete_trip(
    State(state): State<AppState>,
    UrlPath(raw_id): UrlPath<String>,
) -> Result<Json<TripDeletedResponse>, AppError> {
    let id: TripId = raw_id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid trip ID"))?;

    with_store(&state.store, move |store| store.delete_by_id(id)).await?;
    tracing::info!(%id, "trip deleted");

    Ok(Json(TripDeletedResponse {
        message: "Trip deleted successfully".to_string(),
        id,
    }))
}

async fn delete_all_trips(
    State(state): State<AppState>,
) -> Result<Json<TripsClearedResponse>, AppError> {
    let count = with_store(&state.store, |store| store.delete_all()).await?;
    tracing::info!(count, "all trips deleted");

    Ok(Json(TripsClearedResponse {
        message: format!("Deleted {} trips", count),
        count,
    }))
}

/// Price a trip on the server.
async fn estimate(Json(req): Json<EstimateRequest>) -> Json<EstimateResponse> {
    let date = req.date.unwrap_or_else(|| LocalClock.now().date());
    let cost = estimate_cost(&req.cost_query(), date);

    Json(EstimateResponse {
        distance_km: req.distance_km(),
        cost,
    })
}

async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> Result<Json<PlaceSearchResponse>, AppError> {
    let places = suggest_places(state.geocoder.as_ref(), &query.q, &state.country).await?;
    Ok(Json(PlaceSearchResponse { places }))
}

/// Best match for a typed destination.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let place = search_destination(state.geocoder.as_ref(), &query.q, &state.country)
        .await?
        .ok_or_else(|| AppError::not_found("Location not found"))?;
    Ok(Json(place))
}

async fn reverse(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> Result<impl IntoResponse, AppError> {
    let at = query
        .coordinate()
        .ok_or_else(|| AppError::bad_request("Invalid coordinates"))?;
    let descriptor = state.geocoder.reverse_geocode(at).await?;
    Ok(Json(descriptor))
}
