//! API location configuration, injected at startup.

/// Path prefix of the MLflow REST API.
pub const DEFAULT_API_PREFIX: &str = "/api/2.0/mlflow";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_prefix: String,
}

impl ApiConfig {
    /// Normalizes `prefix` to a leading `/` and no trailing `/`. An empty
    /// prefix means the endpoints live at the root.
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let trimmed = prefix.as_ref().trim().trim_matches('/');
        let api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        Self { api_prefix }
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// Joins an endpoint path such as `runs/get` onto the prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_prefix, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_PREFIX)
    }
}
