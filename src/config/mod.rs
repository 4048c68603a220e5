use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of the stored access token, in days
    pub token_expiry_days: i64,
    pub login_path: String,
    pub landing_path: String,
    /// Directory holding `credentials.json`; `None` resolves to the user config dir
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub search_debounce_ms: u64,
    pub default_page_size: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("CONSOLE_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("CONSOLE_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("CONSOLE_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Session overrides
        if let Ok(v) = env::var("CONSOLE_TOKEN_EXPIRY_DAYS") {
            self.session.token_expiry_days = v.parse().unwrap_or(self.session.token_expiry_days);
        }
        if let Ok(v) = env::var("CONSOLE_CONFIG_DIR") {
            self.session.config_dir = Some(PathBuf::from(v));
        }

        // Listing overrides
        if let Ok(v) = env::var("CONSOLE_SEARCH_DEBOUNCE_MS") {
            self.listing.search_debounce_ms = v.parse().unwrap_or(self.listing.search_debounce_ms);
        }
        if let Ok(v) = env::var("CONSOLE_DEFAULT_PAGE_SIZE") {
            self.listing.default_page_size = v
                .parse()
                .ok()
                .filter(|size: &u32| *size > 0)
                .unwrap_or(self.listing.default_page_size);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000/".to_string(),
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            listing: ListingConfig {
                search_debounce_ms: 500,
                default_page_size: 10,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging-api.example.com/".to_string(),
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            listing: ListingConfig {
                search_debounce_ms: 500,
                default_page_size: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://api.example.com/".to_string(),
                request_timeout_secs: 30,
                enable_request_logging: false,
            },
            session: SessionConfig::default(),
            listing: ListingConfig {
                search_debounce_ms: 500,
                default_page_size: 10,
            },
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_expiry_days: 7,
            login_path: "/login".to_string(),
            landing_path: "/".to_string(),
            config_dir: None,
        }
    }
}

impl SessionConfig {
    /// Resolve the directory holding persisted console state
    pub fn resolve_config_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        let home = env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        Ok(PathBuf::from(home).join(".config").join("commerce-console"))
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.api.base_url.starts_with("http://localhost"));
        assert_eq!(config.listing.search_debounce_ms, 500);
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.api.base_url.starts_with("https://"));
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.session.login_path, "/login");
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let session = SessionConfig {
            config_dir: Some(PathBuf::from("/tmp/console-test")),
            ..SessionConfig::default()
        };
        assert_eq!(session.resolve_config_dir().unwrap(), PathBuf::from("/tmp/console-test"));
    }
}
