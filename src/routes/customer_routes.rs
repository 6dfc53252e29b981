use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::customer_controller::CustomerController;
use crate::dto::customer_dto::{
    CreateCustomerRequest, ImportReport, ImportRowsRequest, SummaryResponse, UpdateCustomerRequest,
};
use crate::dto::ApiResponse;
use crate::models::customer::CustomerRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/import", post(import_customers))
        .route("/summary", get(get_summary))
        .route("/:id", put(update_customer).delete(delete_customer))
}

async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CustomerRecord>>>, AppError> {
    let controller = CustomerController::new(state.repository.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerRecord>>, AppError> {
    let controller = CustomerController::new(state.repository.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn import_customers(
    State(state): State<AppState>,
    Json(request): Json<ImportRowsRequest>,
) -> Result<Json<ApiResponse<ImportReport>>, AppError> {
    let controller = CustomerController::new(state.repository.clone());
    let response = controller.import(request).await?;
    Ok(Json(response))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerRecord>>, AppError> {
    let controller = CustomerController::new(state.repository.clone());
    let response = controller.update(&id, request).await?;
    Ok(Json(response))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let controller = CustomerController::new(state.repository.clone());
    let response = controller.delete(&id).await?;
    Ok(Json(response))
}

async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SummaryResponse>>, AppError> {
    let controller = CustomerController::new(state.repository.clone());
    let response = controller.summary().await?;
    Ok(Json(response))
}
