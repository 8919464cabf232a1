pub mod lessons;
pub mod modules;

use serde::{Deserialize, Serialize};

pub const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
        }
    }
}
