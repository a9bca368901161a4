//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Routing provider configuration.
    pub maps: MapsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on one route lookup while quoting, in seconds.
    #[serde(default = "default_quote_deadline")]
    pub quote_deadline_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            quote_deadline_secs: default_quote_deadline(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_quote_deadline() -> u64 {
    15
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Routing provider (Google Maps Platform) configuration.
#[derive(Clone, Deserialize)]
pub struct MapsConfig {
    /// API key sent with every provider request.
    pub api_key: String,
    /// Base URL of the Maps web services.
    #[serde(default = "default_maps_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_maps_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &"[hidden]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_maps_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_maps_timeout() -> u64 {
    10
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{RUN_MODE}.toml`, then `FREIGHTDESK__SECTION__KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, or if the maps
    /// API key is blank.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FREIGHTDESK").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        if app.maps.api_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "maps.api_key must not be empty".to_string(),
            ));
        }

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 3] = [
        (
            "FREIGHTDESK__DATABASE__URL",
            Some("postgres://localhost/freightdesk_test"),
        ),
        ("FREIGHTDESK__JWT__SECRET", Some("test-secret")),
        ("FREIGHTDESK__MAPS__API_KEY", Some("maps-key")),
    ];

    #[test]
    fn test_load_from_environment_with_defaults() {
        temp_env::with_vars(REQUIRED, || {
            let config = AppConfig::load().unwrap();

            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.quote_deadline_secs, 15);
            assert_eq!(config.database.max_connections, 10);
            assert_eq!(config.jwt.access_token_expiry_secs, 3600);
            assert_eq!(config.maps.api_key, "maps-key");
            assert_eq!(
                config.maps.base_url,
                "https://maps.googleapis.com/maps/api"
            );
            assert_eq!(config.maps.timeout_secs, 10);
        });
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        temp_env::with_vars(
            [
                REQUIRED[0],
                REQUIRED[1],
                ("FREIGHTDESK__MAPS__API_KEY", Some("   ")),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert!(err.to_string().contains("api_key"));
            },
        );
    }

    #[test]
    fn test_maps_config_debug_hides_key() {
        let maps = MapsConfig {
            api_key: "super-secret".to_string(),
            base_url: default_maps_base_url(),
            timeout_secs: 5,
        };

        let rendered = format!("{maps:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[hidden]"));
    }
}
