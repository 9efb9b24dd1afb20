//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults
//! for the non-secret values. Provider API keys have no defaults on purpose:
//! a missing key is not a startup failure, the affected generation action
//! reports `API_KEY_MISSING` instead.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets other crates (tests,
/// build scripts) refer to them if needed later.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";
pub const ENV_OPENROUTER_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_HUGGINGFACE_BASE_URL: &str = "HUGGINGFACE_BASE_URL";
pub const ENV_APP_URL: &str = "APP_URL";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://router.huggingface.co/hf-inference";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    openrouter_api_key: Option<String>,
    huggingface_api_key: Option<String>,
    openrouter_base_url: String,
    huggingface_base_url: String,
    app_url: String,
}

impl Config {
    /// Create a config explicitly, bypassing the environment. Used by tests
    /// to point provider clients at local mock servers.
    pub fn new(
        bind_addr: impl Into<String>,
        openrouter_api_key: Option<String>,
        huggingface_api_key: Option<String>,
        openrouter_base_url: impl Into<String>,
        huggingface_base_url: impl Into<String>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            openrouter_api_key,
            huggingface_api_key,
            openrouter_base_url: openrouter_base_url.into(),
            huggingface_base_url: huggingface_base_url.into(),
            app_url: app_url.into(),
        }
    }

    /// Load from environment variables, falling back to development defaults
    /// for everything except the provider credentials.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let openrouter_api_key = env::var(ENV_OPENROUTER_API_KEY).ok().filter(|k| !k.is_empty());
        let huggingface_api_key = env::var(ENV_HUGGINGFACE_API_KEY)
            .ok()
            .filter(|k| !k.is_empty());
        let openrouter_base_url = env::var(ENV_OPENROUTER_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_OPENROUTER_BASE_URL.to_string());
        let huggingface_base_url = env::var(ENV_HUGGINGFACE_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_HUGGINGFACE_BASE_URL.to_string());
        let app_url = env::var(ENV_APP_URL).unwrap_or_else(|_| DEFAULT_APP_URL.to_string());

        validate_base_url(ENV_OPENROUTER_BASE_URL, &openrouter_base_url)?;
        validate_base_url(ENV_HUGGINGFACE_BASE_URL, &huggingface_base_url)?;

        Ok(Self {
            bind_addr,
            openrouter_api_key,
            huggingface_api_key,
            openrouter_base_url,
            huggingface_base_url,
            app_url,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Credential for the text-generation provider, if configured.
    pub fn openrouter_api_key(&self) -> Option<&str> {
        self.openrouter_api_key.as_deref()
    }
    /// Credential for the image-generation provider, if configured.
    pub fn huggingface_api_key(&self) -> Option<&str> {
        self.huggingface_api_key.as_deref()
    }
    /// Base URL of the chat-completions API (overridable for tests).
    pub fn openrouter_base_url(&self) -> &str {
        &self.openrouter_base_url
    }
    /// Base URL of the image inference API (overridable for tests).
    pub fn huggingface_base_url(&self) -> &str {
        &self.huggingface_base_url
    }
    /// Public URL of this application, sent as the `HTTP-Referer` header.
    pub fn app_url(&self) -> &str {
        &self.app_url
    }
}

fn validate_base_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_OPENROUTER_API_KEY,
            ENV_HUGGINGFACE_API_KEY,
            ENV_OPENROUTER_BASE_URL,
            ENV_HUGGINGFACE_BASE_URL,
            ENV_APP_URL,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), super::DEFAULT_BIND_ADDR);
        assert_eq!(cfg.openrouter_api_key(), None);
        assert_eq!(cfg.huggingface_api_key(), None);
        assert_eq!(cfg.openrouter_base_url(), super::DEFAULT_OPENROUTER_BASE_URL);
        assert_eq!(
            cfg.huggingface_base_url(),
            super::DEFAULT_HUGGINGFACE_BASE_URL
        );
        assert_eq!(cfg.app_url(), super::DEFAULT_APP_URL);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_OPENROUTER_API_KEY, "sk-or-test");
            env::set_var(ENV_OPENROUTER_BASE_URL, "http://127.0.0.1:5555/api/v1");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.openrouter_api_key(), Some("sk-or-test"));
        assert_eq!(cfg.openrouter_base_url(), "http://127.0.0.1:5555/api/v1");
        assert_eq!(cfg.huggingface_api_key(), None);
        clear_env();
    }

    #[test]
    fn empty_api_key_treated_as_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_HUGGINGFACE_API_KEY, "");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.huggingface_api_key(), None);
        clear_env();
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_OPENROUTER_BASE_URL, "not a url");
        }
        let result = Config::from_env();
        assert!(result.is_err());
        clear_env();
    }
}
