mod url;

pub use url::{AddUrlParams, HealthResponse};
