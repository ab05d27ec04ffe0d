use companyrating_core::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub store: HealthDependencyStatus,
}

/// Status of one backing dependency.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-dependency-status.ts"
)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Bare success acknowledgement.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/success-response.ts"
)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Reads a loosely typed JSON value as text. Numbers and booleans are stringified,
/// `null` and empty strings count as absent.
pub fn coerce_text(field: &str, value: Option<Value>) -> AppResult<Option<String>> {
    let text = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => {
            return Err(AppError::Validation(format!("{field} must be text")));
        }
    };

    Ok(text.filter(|text| !text.is_empty()))
}
