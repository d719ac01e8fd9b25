/// Configuration management for News Service
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Media storage configuration
    pub media: MediaConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Media storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root directory where uploaded files are stored
    pub root: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. `from_env`
    /// passes the process environment; tests pass fixed maps.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let app_env = var("APP_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: var("NEWS_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: var("NEWS_SERVICE_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8084),
            },
            cors: {
                let allowed_origins = match var("CORS_ALLOWED_ORIGINS") {
                    Some(value) => value,
                    None if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    None => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL")
                    .unwrap_or_else(|| "postgresql://localhost/news".to_string()),
                max_connections: var("DATABASE_MAX_CONNECTIONS")
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            media: MediaConfig {
                root: var("MEDIA_ROOT").unwrap_or_else(|| "media".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = Config::from_lookup(|_| None).expect("config");
        assert_eq!(config.app.port, 8084);
        assert_eq!(config.media.root, "media");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
    }

    #[test]
    fn production_requires_explicit_cors_origins() {
        let err = Config::from_lookup(lookup(&[("APP_ENV", "production")]))
            .expect_err("missing origins");
        assert!(err.contains("CORS_ALLOWED_ORIGINS"));

        let err = Config::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "*"),
        ]))
        .expect_err("wildcard origins");
        assert!(err.contains("cannot be '*'"));
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let config =
            Config::from_lookup(lookup(&[("NEWS_SERVICE_PORT", "not-a-port")])).expect("config");
        assert_eq!(config.app.port, 8084);
    }
}
