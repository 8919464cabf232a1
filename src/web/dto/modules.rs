use serde::{Deserialize, Serialize};

use crate::web::dto::STATUS_OK;

#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ModuleCreateBody {
    pub title: String,
    /// Id of the lesson the module belongs to
    pub lesson: String,
}

/// Echo of the accepted request.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ModuleCreatedResponse {
    pub title: String,
    pub lesson: String,
    pub status: String,
}

impl From<ModuleCreateBody> for ModuleCreatedResponse {
    fn from(body: ModuleCreateBody) -> Self {
        Self {
            title: body.title,
            lesson: body.lesson,
            status: STATUS_OK.to_string(),
        }
    }
}
