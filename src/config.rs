//! Application configuration.
//!
//! Values resolve with priority: config.toml > .env / environment > default.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

// ==================== Storage Configuration ====================

/// Key the game snapshot is stored under
pub const STORAGE_KEY: &str = "graspify-game-storage";

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    port: Option<u16>,
}

fn parse_config(contents: &str) -> AppConfig {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            AppConfig::default()
        }
    }
}

fn read_config_file() -> AppConfig {
    std::fs::read_to_string("config.toml")
        .map(|contents| parse_config(&contents))
        .unwrap_or_default()
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Some(path) = read_config_file().database.and_then(|db| db.path) {
        tracing::info!("Using database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::db_path());
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Port used when neither config.toml nor PORT set one
pub const DEFAULT_PORT: u16 = 3000;

fn port_from(config: &AppConfig, env_port: Option<String>) -> u16 {
    if let Some(port) = config.server.as_ref().and_then(|s| s.port) {
        return port;
    }
    env_port
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Server port with priority: config.toml > PORT env > default
pub fn server_port() -> u16 {
    let _ = dotenvy::dotenv();
    port_from(&read_config_file(), std::env::var("PORT").ok())
}

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, server_port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [database]
            path = "/tmp/game.db"

            [server]
            port = 8080
            "#,
        );
        assert_eq!(
            config.database.and_then(|d| d.path).as_deref(),
            Some("/tmp/game.db")
        );
        assert_eq!(config.server.and_then(|s| s.port), Some(8080));
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let config = parse_config("[server\nport = ");
        assert!(config.database.is_none());
        assert!(config.server.is_none());
    }

    #[test]
    fn test_port_priority() {
        let with_file = parse_config("[server]\nport = 9000");
        assert_eq!(port_from(&with_file, Some("4000".into())), 9000);

        let empty = AppConfig::default();
        assert_eq!(port_from(&empty, Some("4000".into())), 4000);
        assert_eq!(port_from(&empty, Some("not-a-port".into())), DEFAULT_PORT);
        assert_eq!(port_from(&empty, None), DEFAULT_PORT);
    }
}
