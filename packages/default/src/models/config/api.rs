use serde::Deserialize;

/// Where the environments API lives.
///
/// This section is loaded from `[api]` in `config.toml`. The base URL is
/// fixed for the lifetime of a client; a trailing `/` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
