use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use freight_common::{Cargo, Location, Truck};
use freight_domains::{
    cargo_detail, list_cargo, CargoDetail, CargoListFilter, CargoListItem, CargoUpdate,
    DetailOrder, NewCargo, NewTruck,
};

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Cargo
        .route("/cargo-create/", post(cargo_create))
        .route("/cargo-list/", get(cargo_list))
        .route("/cargo-detail/{id}/", get(cargo_detail_handler))
        .route("/cargo-update/{id}/", patch(cargo_update).put(cargo_update))
        .route("/cargo-destroy/{id}/", delete(cargo_destroy))
        // Trucks
        .route("/truck-create/", post(truck_create))
        .route("/truck-update/{id}/", patch(truck_update).put(truck_update))
        // Meta
        .route("/health", get(|| async { "ok" }))
        .route("/schema", get(schema))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

// --- Request bodies ---

#[derive(Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    order: DetailOrder,
}

#[derive(Deserialize)]
pub struct TruckLocationUpdate {
    location: String,
}

// --- Cargo ---

async fn cargo_create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewCargo>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Cargo>)> {
    let Json(new) = body?;
    let cargo = state.registry.write().await.create_cargo(new)?;
    Ok((StatusCode::CREATED, Json(cargo)))
}

async fn cargo_list(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<CargoListFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<CargoListItem>>> {
    let Query(filter) = filter?;
    let registry = state.registry.read().await;
    let items = list_cargo(&registry, &filter, state.default_radius)?;
    Ok(Json(items))
}

async fn cargo_detail_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> ApiResult<Json<CargoDetail>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let registry = state.registry.read().await;
    Ok(Json(cargo_detail(&registry, id, query.order)?))
}

async fn cargo_update(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<CargoUpdate>, JsonRejection>,
) -> ApiResult<Json<Cargo>> {
    let Path(id) = id?;
    let Json(update) = body?;
    let cargo = state.registry.write().await.update_cargo(id, update)?;
    Ok(Json(cargo))
}

async fn cargo_destroy(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.registry.write().await.delete_cargo(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Trucks ---

async fn truck_create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewTruck>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Truck>)> {
    let Json(new) = body?;
    let mut registry = state.registry.write().await;
    let truck = registry.create_truck(new, &mut rand::rng())?;
    Ok((StatusCode::CREATED, Json(truck)))
}

async fn truck_update(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<TruckLocationUpdate>, JsonRejection>,
) -> ApiResult<Json<Truck>> {
    let Path(id) = id?;
    let Json(update) = body?;
    let truck = state
        .registry
        .write()
        .await
        .update_truck_location(id, &update.location)?;
    info!(id, location = %truck.location, "Truck location updated");
    Ok(Json(truck))
}

// --- Meta ---

async fn schema() -> impl IntoResponse {
    Json(json!({
        "location": schemars::schema_for!(Location),
        "truck": schemars::schema_for!(Truck),
        "cargo": schemars::schema_for!(Cargo),
    }))
}
