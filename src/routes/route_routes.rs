use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    DistanceQuery, ReplaceOrderRequest, RouteDistanceResponse, SaveSegmentsRequest, SetPositionRequest,
    UpdateRouteRequest,
};
use crate::dto::ApiResponse;
use crate::models::customer::CustomerRecord;
use crate::models::route::Route;
use crate::models::segment::{SegmentChoices, SegmentPlanEntry};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/:id", put(update_route))
        .route("/:id/order", put(replace_order))
        .route("/:id/position", post(set_position))
        .route("/:id/visits", get(visit_order))
        .route("/:id/segments", get(segment_plan).put(save_segments))
        .route("/:id/distance", get(route_distance))
}

fn controller(state: &AppState) -> RouteController {
    RouteController::new(state.repository.clone(), state.distance.clone())
}

async fn list_routes(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Route>>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let response = controller(&state).update(&id, request).await?;
    Ok(Json(response))
}

async fn replace_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReplaceOrderRequest>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let response = controller(&state).replace_order(&id, request).await?;
    Ok(Json(response))
}

async fn set_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetPositionRequest>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let response = controller(&state).set_position(&id, request).await?;
    Ok(Json(response))
}

async fn visit_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CustomerRecord>>>, AppError> {
    let response = controller(&state).visit_order(&id).await?;
    Ok(Json(response))
}

async fn segment_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<SegmentPlanEntry>>>, AppError> {
    let response = controller(&state).segment_plan(&id).await?;
    Ok(Json(response))
}

async fn save_segments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SaveSegmentsRequest>,
) -> Result<Json<ApiResponse<SegmentChoices>>, AppError> {
    let response = controller(&state).save_segments(&id, request).await?;
    Ok(Json(response))
}

async fn route_distance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<ApiResponse<RouteDistanceResponse>>, AppError> {
    let response = controller(&state).distance(&id, query).await?;
    Ok(Json(response))
}
