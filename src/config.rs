// Configuration module
// Layered settings: built-in defaults, optional filecast.{toml,yaml,json}, FILECAST_* environment

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// Config file name (without extension) looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "filecast";

/// Environment variable prefix, e.g. `FILECAST_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "FILECAST";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the engine on a single thread
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a client may take to send request headers. Never bounds a
    /// response in progress. `None` disables it.
    pub header_read_timeout: Option<u64>,
    pub shutdown_timeout: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub max_upload_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                header_read_timeout: None,
                shutdown_timeout: 10,
            },
            http: HttpConfig {
                max_upload_size: 10_485_760, // 10MB
            },
        }
    }
}

impl Config {
    /// Load configuration using the default file name
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_NAME)
    }

    /// Load configuration from specified file path (without extension).
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.access_log", defaults.logging.access_log)?
            .set_default("performance.keep_alive", defaults.performance.keep_alive)?
            .set_default(
                "performance.shutdown_timeout",
                defaults.performance.shutdown_timeout,
            )?
            .set_default(
                "http.max_upload_size",
                u64::try_from(defaults.http.max_upload_size).unwrap_or(u64::MAX),
            )?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.socket_addr()?;
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, config::ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| config::ConfigError::Message(format!("Invalid address: {e}")))
    }
}

impl PerformanceConfig {
    pub fn header_read_timeout(&self) -> Option<Duration> {
        self.header_read_timeout.map(Duration::from_secs)
    }

    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_toml(contents: &str) -> Result<Config, config::ConfigError> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("custom.toml"), contents).unwrap();
        let base = dir.path().join("custom");
        Config::load_from(base.to_str().unwrap())
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("absent");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.workers, None);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.http.max_upload_size, 10_485_760);
        assert_eq!(cfg.performance.header_read_timeout(), None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = load_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090
            workers = 4

            [performance]
            shutdown_timeout = 2
            header_read_timeout = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(4));
        assert_eq!(cfg.performance.shutdown_timeout(), Duration::from_secs(2));
        assert_eq!(
            cfg.performance.header_read_timeout(),
            Some(Duration::from_secs(5))
        );
        // untouched keys keep their defaults
        assert!(cfg.performance.keep_alive);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = load_toml(
            r#"
            [server]
            host = "not a host"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid address"));
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        assert_eq!(cfg.socket_addr().unwrap(), "127.0.0.1:0".parse().unwrap());
    }
}
