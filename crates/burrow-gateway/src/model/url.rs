use serde::{Deserialize, Serialize};

/// Query string or form body of `/add`.
#[derive(Debug, Default, Deserialize)]
pub struct AddUrlParams {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Number of keys currently mapped.
    pub entries: usize,
}
