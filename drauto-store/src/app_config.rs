use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
}

fn default_session_ttl() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Layer the per-environment file on top; optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // A local file for overrides that shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `DRAUTO_SERVER__PORT=7000` would set `server.port`
            .add_source(config::Environment::with_prefix("DRAUTO").separator("__"))
            .set_override("environment", run_mode)?
            .build()?;

        s.try_deserialize()
    }

    /// Production toggles the cross-site cookie attributes.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(environment: &str) -> Config {
        Config {
            environment: environment.to_string(),
            server: ServerConfig { port: 7000 },
            database: DatabaseConfig {
                url: "postgres://localhost/drauto".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: "secret".to_string(),
                session_ttl_seconds: 3600,
            },
            cors: CorsConfig {
                allowed_origins: vec![],
            },
        }
    }

    #[test]
    fn test_only_production_run_mode_is_production() {
        assert!(config_for("production").is_production());
        assert!(!config_for("development").is_production());
        assert!(!config_for("staging").is_production());
    }
}
