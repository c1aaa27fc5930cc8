use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

/// A persisted `(key, url)` pair.
///
/// Records are written once per accepted insertion and never rewritten.
/// The serialized field names are part of the on-disk log format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Key")]
    pub key: ShortCode,
    #[serde(rename = "URL")]
    pub url: String,
}

impl Record {
    pub fn new(key: ShortCode, url: impl Into<String>) -> Self {
        Self {
            key,
            url: url.into(),
        }
    }
}
