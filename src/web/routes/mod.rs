use crate::web::{AppState, doc::ApiDoc};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod lessons;
pub mod modules;

pub fn build_app(state: AppState) -> Router {
    let docs = state.config().app().docs();

    let mut router = Router::new()
        .nest("/api/ext/collections/modules", modules::routes(state.clone()))
        .nest("/api/ext/lessons", lessons::routes(state.clone()))
        .layer(CookieManagerLayer::default())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if docs {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", openapi));
    }

    router
}
