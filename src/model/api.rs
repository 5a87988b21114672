use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Counting game status as returned by `GET /api/counting/status`.
///
/// Discord ids are serialized as strings since they exceed the integer precision of
/// JavaScript clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingStatusDto {
    pub current_count: u64,
    pub next_expected: u64,
    pub last_contributor_id: Option<String>,
    pub initialized: bool,
}

/// Body of `POST /api/counting/reset`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetCountDto {
    #[serde(default)]
    pub count: u64,
}
