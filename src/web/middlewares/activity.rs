use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    error::log_error,
    model::entity::{ActivityLog, ActivityLogCreate},
    web::{AppState, RequestContext},
};

/// Upper bound on how long a response waits for its `activity_logs` row.
pub const ACTIVITY_LOG_WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// Logs every handled request. With `app.activity_log` enabled the entry is
/// also written to the `activity_logs` collection; a failed or timed out
/// write is logged and never changes the response.
pub async fn activity_log_fn(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let url = req.uri().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    let elapsed_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
    let status = res.status().as_u16();
    let user_id = res
        .extensions()
        .get::<RequestContext>()
        .and_then(RequestContext::maybe_user)
        .map(|user| user.user_id());

    tracing::info!(%method, %url, status, elapsed_ms, user_id = ?user_id, "request handled");

    if state.config().app().activity_log() {
        let entry = ActivityLogCreate {
            method,
            url,
            status,
            user_id,
            elapsed_ms,
        };

        let write = async {
            let mut conn = state.pool().acquire().await?;
            ActivityLog::record(&mut conn, entry).await.map(|_| ())
        };

        match tokio::time::timeout(ACTIVITY_LOG_WRITE_TIMEOUT, write).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log_error(&e),
            Err(_) => tracing::warn!(
                timeout_ms = ACTIVITY_LOG_WRITE_TIMEOUT.as_millis() as u64,
                "activity log write timed out"
            ),
        }
    }

    res
}
