use serde::{Deserialize, Serialize};

/// Identity held in the session after an OAuth login.
///
/// Built from the provider profile on every login and never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub provider: String,
}
