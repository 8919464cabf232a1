use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::post,
};

use crate::{
    model::{
        ResourceTyped,
        entity::{Lesson, Module, ModuleCreate},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::{
            lessons::parse_record_id,
            modules::{ModuleCreateBody, ModuleCreatedResponse},
        },
        error::ErrorResponse,
        extract::JsonOrForm,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/records", post(modules_create_handler))
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
    path = "/api/ext/collections/modules/records",
    description = "Creates a module under a lesson and appends its id to the lesson's module list. \
                   Accepts JSON or form-encoded bodies.",
    request_body = ModuleCreateBody,
    responses(
        (status = 200, description = "Module created", body = ModuleCreatedResponse),
        (status = 400, description = "Body unreadable or module invalid", body = ErrorResponse),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("bearer" = []),
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn modules_create_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<ModuleCreateBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let lesson_id = parse_record_id(&payload.lesson)
        .ok_or_else(|| WebError::resource_not_found(Lesson::get_resource_type()))?;

    let data = ModuleCreate::with_placeholder(lesson_id, payload.title.as_str());
    let (module, _) = Module::create_in_lesson(state.pool(), data)
        .await
        .map_err(|e| WebError::from_database(Module::get_resource_type(), e))?;

    tracing::info!(
        user_id = %user.user_id(),
        module_id = %module.id(),
        lesson_id = %lesson_id,
        "module created"
    );

    Ok((StatusCode::OK, Json(ModuleCreatedResponse::from(payload))))
}
