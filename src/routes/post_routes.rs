use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::PostController;
use crate::dto::booking_dto::LimitQuery;
use crate::dto::post_dto::{CreatePostRequest, PostDetail, PostSummary, UpdatePostRequest};
use crate::dto::ApiResponse;
use crate::models::blog_post::BlogPost;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/api/posts", get(admin_list_posts).post(admin_create_post))
        .route(
            "/admin/api/posts/:id",
            get(admin_get_post)
                .patch(admin_update_post)
                .delete(admin_delete_post),
        )
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<PostSummary>>> {
    let controller = PostController::new(&state);
    Ok(Json(controller.list_published(query.limit).await?))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PostDetail>> {
    let controller = PostController::new(&state);
    Ok(Json(controller.get_public(&slug).await?))
}

async fn admin_list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<BlogPost>>> {
    let controller = PostController::new(&state);
    Ok(Json(controller.list_all().await?))
}

async fn admin_create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BlogPost>>)> {
    let Json(request) = payload?;
    let controller = PostController::new(&state);
    let post = controller.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(post, "Post created")),
    ))
}

async fn admin_get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BlogPost>> {
    let controller = PostController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn admin_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let Json(request) = payload?;
    let controller = PostController::new(&state);
    let post = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(post, "Post updated")))
}

async fn admin_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let controller = PostController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Post deleted")))
}
