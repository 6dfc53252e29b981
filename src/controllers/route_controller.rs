use std::sync::Arc;
use validator::Validate;

use crate::dto::route_dto::{
    DistanceQuery, ReplaceOrderRequest, RouteDistanceResponse, SaveSegmentsRequest, SetPositionRequest,
    UpdateRouteRequest,
};
use crate::dto::ApiResponse;
use crate::models::customer::CustomerRecord;
use crate::models::route::{find_route, Route};
use crate::models::segment::{SegmentChoices, SegmentPlanEntry};
use crate::repositories::DataRepository;
use crate::services::route_order_service::{self, OrderPosition};
use crate::services::{segment_service, RouteDistanceService};
use crate::utils::errors::{not_found_error, AppError};

pub struct RouteController {
    repository: DataRepository,
    distance: Arc<RouteDistanceService>,
}

impl RouteController {
    pub fn new(repository: DataRepository, distance: Arc<RouteDistanceService>) -> Self {
        Self { repository, distance }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Route>>, AppError> {
        let routes = self.repository.routes().await?;
        Ok(ApiResponse::success(routes))
    }

    /// Renombrar o cambiar el color
    pub async fn update(&self, route_id: &str, request: UpdateRouteRequest) -> Result<ApiResponse<Route>, AppError> {
        request.validate()?;

        let mut routes = self.repository.routes().await?;
        let route = routes
            .iter_mut()
            .find(|r| r.id == route_id)
            .ok_or_else(|| not_found_error("Route", route_id))?;

        if let Some(name) = request.name {
            route.name = name.trim().to_string();
        }
        if let Some(color) = request.color {
            route.color = color.to_lowercase();
        }
        let updated = route.clone();
        self.repository.save_routes(&routes).await?;

        Ok(ApiResponse::success(updated))
    }

    pub async fn replace_order(
        &self,
        route_id: &str,
        request: ReplaceOrderRequest,
    ) -> Result<ApiResponse<Route>, AppError> {
        let route = route_order_service::save_order(&self.repository, route_id, request.order).await?;
        Ok(ApiResponse::success_with_message(
            route,
            "Orden de visita guardado".to_string(),
        ))
    }

    pub async fn set_position(
        &self,
        route_id: &str,
        request: SetPositionRequest,
    ) -> Result<ApiResponse<Route>, AppError> {
        let position = OrderPosition::from_input(request.position);
        let route =
            route_order_service::update_position(&self.repository, route_id, &request.customer_id, position).await?;
        Ok(ApiResponse::success(route))
    }

    pub async fn visit_order(&self, route_id: &str) -> Result<ApiResponse<Vec<CustomerRecord>>, AppError> {
        let members = route_order_service::visit_order(&self.repository, route_id).await?;
        Ok(ApiResponse::success(members))
    }

    pub async fn segment_plan(&self, route_id: &str) -> Result<ApiResponse<Vec<SegmentPlanEntry>>, AppError> {
        let plan = segment_service::route_segment_plan(&self.repository, route_id).await?;
        Ok(ApiResponse::success(plan))
    }

    pub async fn save_segments(
        &self,
        route_id: &str,
        request: SaveSegmentsRequest,
    ) -> Result<ApiResponse<SegmentChoices>, AppError> {
        let routes = self.repository.routes().await?;
        if find_route(&routes, route_id).is_none() {
            return Err(not_found_error("Route", route_id));
        }

        segment_service::set_choices(&self.repository, route_id, request.segments).await?;
        let saved = segment_service::get_choices(&self.repository, route_id).await?;
        Ok(ApiResponse::success_with_message(
            saved,
            "Tipos de vía guardados".to_string(),
        ))
    }

    pub async fn distance(
        &self,
        route_id: &str,
        query: DistanceQuery,
    ) -> Result<ApiResponse<RouteDistanceResponse>, AppError> {
        let result = self
            .distance
            .route_distance(&self.repository, route_id, query.mode)
            .await?;

        let message = match result.failed_segments() {
            0 => None,
            failed => Some(format!("{} tramos sin distancia", failed)),
        };

        Ok(ApiResponse {
            success: true,
            message,
            data: Some(RouteDistanceResponse {
                route_id: route_id.to_string(),
                result,
            }),
        })
    }
}
