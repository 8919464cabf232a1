use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

use crate::web::WebError;

/// Request body accepted either as JSON or as `application/x-www-form-urlencoded`,
/// chosen by `Content-Type`. Anything else is parsed as JSON and rejected as a
/// bad request when that fails.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(data) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| WebError::body_rejected(e.body_text()))?;
            return Ok(Self(data));
        }

        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| WebError::body_rejected(e.body_text()))?;
        Ok(Self(data))
    }
}
