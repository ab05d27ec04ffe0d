use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Message relayed between dashboard clients over `/ws`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/visibility-message.ts"
)]
pub enum VisibilityMessage {
    ShowRatingsUpdate { value: bool },
}

impl VisibilityMessage {
    /// Parses a client frame. Anything that is not a well-formed update yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    pub fn value(self) -> bool {
        match self {
            Self::ShowRatingsUpdate { value } => value,
        }
    }
}

/// Visibility flag as read or written over HTTP.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ratings-visibility-payload.ts"
)]
pub struct RatingsVisibilityPayload {
    pub value: bool,
}
