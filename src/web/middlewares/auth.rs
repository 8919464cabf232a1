use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    auth,
    model::{Repository, ResourceTyped, entity::UserEntity},
    web::{AppState, RequestContext, WebResult, context::AuthenticatedUser, error::WebError},
};

pub static AUTH_TOKEN: &str = "SID";

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the caller's identity and stores it as a [`RequestContext`] in
/// the request extensions. The context is copied onto the response as well so
/// outer layers can see who made the request.
///
/// No token means an anonymous context, an invalid token is rejected.
pub async fn extract_context_fn(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = match bearer_token(req.headers()) {
        Some(token) => Some(("bearer", token.to_owned())),
        None => cookies
            .get(AUTH_TOKEN)
            .map(|cookie| ("cookie", cookie.value().to_owned())),
    };

    let ctx = match token {
        Some((source, token)) => resolve_context(&state, source, &token).await?,
        None => RequestContext::anonymous(),
    };

    req.extensions_mut().insert(ctx.clone());
    let mut res = next.run(req).await;
    res.extensions_mut().insert(ctx);
    Ok(res)
}

async fn resolve_context(
    state: &AppState,
    source: &'static str,
    token: &str,
) -> WebResult<RequestContext> {
    let claims = auth::process_token(token, state.config().app().jwt())
        .map_err(|e| WebError::auth_token_invalid(source, e.to_string()))?;

    let id = claims
        .claims
        .user_id()
        .map_err(|e| WebError::auth_token_invalid(source, e.to_string()))?;

    let mut conn = state
        .pool()
        .acquire()
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    let user = UserEntity::find_by_id(&mut conn, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    match user {
        Some(_) => Ok(RequestContext::new(Some(AuthenticatedUser::new(id)))),
        None => {
            tracing::debug!(user_id = %id, "token subject no longer exists");
            Ok(RequestContext::anonymous())
        }
    }
}

/// Rejects anonymous requests before they reach the handler.
pub async fn require_user_fn(ctx: RequestContext, req: Request, next: Next) -> WebResult<Response> {
    ctx.user()?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_ignores_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic Zm9vOmJhcg==")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
