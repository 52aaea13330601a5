use secrecy::SecretString;

use crate::sources::{MissingEnvVarSnafu, SourceInitError};

/// Environment variable the API key is read from.
pub const API_KEY_VAR: &str = "FMP_API_KEY";

/// Production root of the stable FMP REST API. Endpoint paths are appended
/// directly, so the value must end with a slash.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/stable/";

/// Connection settings for [`FmpSource`](super::FmpSource).
///
/// The API key is mandatory and read exactly once, at construction. A
/// missing key fails here, before any request can be issued. The key is
/// held as a [`SecretString`] so it never leaks through `Debug` output or
/// log lines.
#[derive(Debug)]
pub struct FmpConfig {
    api_key: SecretString,
    base_url: String,
}

impl FmpConfig {
    /// Creates a config for the production API root.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a config with the API key from the `FMP_API_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self, SourceInitError> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| MissingEnvVarSnafu { name: API_KEY_VAR }.build())?;
        Ok(Self::new(SecretString::new(api_key.into())))
    }

    /// Points the source at a different API root, e.g. a mirror or a local
    /// stub. Must end with a slash.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}
