use companyrating_core::AdminIdentity;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Admin login payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated admin as exposed to the browser.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/admin-user-response.ts"
)]
pub struct AdminUserResponse {
    pub username: String,
}

impl From<&AdminIdentity> for AdminUserResponse {
    fn from(value: &AdminIdentity) -> Self {
        Self {
            username: value.username().to_owned(),
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-response.ts"
)]
pub struct LoginResponse {
    pub success: bool,
    pub user: AdminUserResponse,
}

/// Current session state.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/session-response.ts"
)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub user: Option<AdminUserResponse>,
}
