use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetail, VehicleListQuery, VehicleResponse,
    VehicleSummary,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/:slug", get(get_vehicle))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/api/vehicles",
            get(admin_list_vehicles).post(admin_create_vehicle),
        )
        .route(
            "/admin/api/vehicles/:id",
            get(admin_get_vehicle)
                .patch(admin_update_vehicle)
                .delete(admin_delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> AppResult<Json<Vec<VehicleSummary>>> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list_active(query.category.as_deref()).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<VehicleDetail>> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get_public(&slug).await?))
}

async fn admin_list_vehicles(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VehicleResponse>>> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list_all().await?))
}

async fn admin_create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<VehicleResponse>>)> {
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(vehicle, "Vehicle created")),
    ))
}

async fn admin_get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<VehicleResponse>> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn admin_update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<VehicleResponse>>> {
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(vehicle, "Vehicle updated")))
}

async fn admin_delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted")))
}
