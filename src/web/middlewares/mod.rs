mod auth;
pub use auth::{AUTH_TOKEN, bearer_token, extract_context_fn, require_user_fn};

mod activity;
pub use activity::{ACTIVITY_LOG_WRITE_TIMEOUT, activity_log_fn};
