use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::BookingController;
use crate::dto::booking_dto::{
    BookingAccepted, BookingListQuery, BookingSubmission, InquiryAccepted, InquirySubmission,
    LimitQuery, StatusTransitionRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::models::booking::BookingRequest;
use crate::models::inquiry::InquiryRequest;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Public submission endpoints, rate limited per client
pub fn submission_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(submit_booking))
        .route("/api/inquiries", post(submit_inquiry))
        .route_layer(middleware::from_fn_with_state(
            state.rate_limit.clone(),
            rate_limit_middleware,
        ))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/api/bookings", get(list_bookings))
        .route(
            "/admin/api/bookings/:id",
            get(get_booking).delete(delete_booking),
        )
        .route("/admin/api/bookings/:id/status", patch(update_status))
        .route("/admin/api/inquiries", get(list_inquiries))
}

async fn submit_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingSubmission>, JsonRejection>,
) -> AppResult<Json<BookingAccepted>> {
    let Json(submission) = payload?;
    let booking = state.intake().submit_booking(submission).await?;
    Ok(Json(BookingAccepted {
        success: true,
        message: "Booking request received. We will contact you shortly to confirm.".to_string(),
        id: booking.id,
    }))
}

async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquirySubmission>, JsonRejection>,
) -> AppResult<Json<InquiryAccepted>> {
    let Json(submission) = payload?;
    state.intake().submit_inquiry(submission).await?;
    Ok(Json(InquiryAccepted {
        success: true,
        message: "Thank you for your inquiry. We will get back to you soon.".to_string(),
    }))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Json<Vec<BookingRequest>> {
    let controller = BookingController::new(&state);
    Json(controller.list(query.status.as_deref(), query.limit).await)
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingRequest>> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<StatusTransitionRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<BookingRequest>>> {
    let Json(request) = payload?;
    let controller = BookingController::new(&state);
    let booking = controller.transition(id, request.status).await?;
    Ok(Json(ApiResponse::success(booking)))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let controller = BookingController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Booking deleted")))
}

async fn list_inquiries(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<InquiryRequest>>> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.list_inquiries(query.limit).await?))
}
