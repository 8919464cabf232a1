use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::{extract::State, middleware, response::IntoResponse, Router};

use crate::model::entity::{Lesson, UserLesson};
use crate::model::ResourceTyped;
use crate::web::dto::lessons::parse_record_id;
use crate::web::dto::StatusResponse;
use crate::web::error::ErrorResponse;
use crate::web::{middlewares, AppState, RequestContext, WebError, WebResult};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/{lesson}/subscribe", post(lessons_subscribe_handler))
        .route_layer(middleware::from_fn(middlewares::require_user_fn))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::activity_log_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/ext/lessons/{lesson}/subscribe",
    description = "Subscribes the caller to a lesson and to every module under it",
    params(
        ("lesson" = String, Path, description = "ID of the lesson to subscribe to")
    ),
    responses(
        (status = 200, description = "Subscribed", body = StatusResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("bearer" = []),
        ("cookie" = [])
    ),
    tag = "lessons"
)]
#[tracing::instrument(skip_all)]
pub async fn lessons_subscribe_handler(
    State(state): State<AppState>,
    Path(lesson): Path<String>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let lesson_id = parse_record_id(&lesson)
        .ok_or_else(|| WebError::resource_not_found(Lesson::get_resource_type()))?;

    let subscription = UserLesson::subscribe(state.pool(), user.user_id(), lesson_id)
        .await
        .map_err(|e| WebError::from_database(UserLesson::get_resource_type(), e))?;

    tracing::info!(
        user_id = %user.user_id(),
        lesson_id = %lesson_id,
        modules = subscription.user_modules.len(),
        "lesson subscribed"
    );

    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}
