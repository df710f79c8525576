//! Server configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Create the `persons` table at startup when missing
    pub auto_create_schema: bool,
}

impl ServerConfig {
    /// Load settings from the environment
    ///
    /// # Environment Variables
    /// - `PERSONS_HOST`: bind address (default: "0.0.0.0")
    /// - `PERSONS_PORT`: listen port (default: 3002)
    /// - `PERSONS_AUTO_CREATE_SCHEMA`: create the table at startup (default: true)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3002)?
            .set_default("auto_create_schema", true)?
            .add_source(Environment::with_prefix("PERSONS").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("PERSONS_HOST");
            std::env::remove_var("PERSONS_PORT");
            std::env::remove_var("PERSONS_AUTO_CREATE_SCHEMA");
        }
    }

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        clear_env();

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3002);
        assert!(config.auto_create_schema);
        assert_eq!(config.bind_address(), "0.0.0.0:3002");
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        clear_env();
        unsafe {
            std::env::set_var("PERSONS_HOST", "127.0.0.1");
            std::env::set_var("PERSONS_PORT", "8080");
            std::env::set_var("PERSONS_AUTO_CREATE_SCHEMA", "false");
        }

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(!config.auto_create_schema);

        clear_env();
    }
}
