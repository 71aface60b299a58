use crate::siting::{
    OptimalSiteLocator, ScoreTable, ScoreTableError, SuitabilityScorer, MAGNITUDE_NORMALIZATION,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub siting: SitingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let normalization = env_number("SITING_NORMALIZATION", MAGNITUDE_NORMALIZATION)?;
        if normalization <= 0.0 {
            return Err(ConfigError::InvalidNumber {
                key: "SITING_NORMALIZATION",
                value: normalization.to_string(),
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            siting: SitingConfig {
                normalization,
                land_use_table: env::var_os("SITING_LAND_USE_TABLE").map(PathBuf::from),
                structure_table: env::var_os("SITING_STRUCTURE_TABLE").map(PathBuf::from),
            },
        })
    }
}

fn env_number(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let parsed = raw.trim().parse::<f64>().ok().filter(|value| value.is_finite());
            parsed.ok_or(ConfigError::InvalidNumber { key, value: raw })
        }
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Magnitude divisor and optional score table overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SitingConfig {
    pub normalization: f64,
    pub land_use_table: Option<PathBuf>,
    pub structure_table: Option<PathBuf>,
}

impl Default for SitingConfig {
    fn default() -> Self {
        Self {
            normalization: MAGNITUDE_NORMALIZATION,
            land_use_table: None,
            structure_table: None,
        }
    }
}

impl SitingConfig {
    /// Build a locator, loading any CSV table overrides from disk.
    pub fn locator(&self) -> Result<OptimalSiteLocator, ScoreTableError> {
        let land_use = match &self.land_use_table {
            Some(path) => ScoreTable::from_csv_path(path)?,
            None => ScoreTable::land_use(),
        };
        let structure = match &self.structure_table {
            Some(path) => ScoreTable::from_csv_path(path)?,
            None => ScoreTable::structure(),
        };

        let scorer = SuitabilityScorer::new(land_use, structure)
            .with_normalization(self.normalization);
        Ok(OptimalSiteLocator::new(scorer))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a finite number (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SITING_NORMALIZATION");
        env::remove_var("SITING_LAND_USE_TABLE");
        env::remove_var("SITING_STRUCTURE_TABLE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.siting, SitingConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_siting_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITING_NORMALIZATION", "50000");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.siting.normalization, 50_000.0);

        let locator = config.siting.locator().expect("standard tables");
        assert_eq!(locator.scorer().normalization(), 50_000.0);
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_normalization() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITING_NORMALIZATION", "lots");
        match AppConfig::load() {
            Err(ConfigError::InvalidNumber { key, value }) => {
                assert_eq!(key, "SITING_NORMALIZATION");
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn loads_table_override_from_csv() {
        let path = env::temp_dir().join(format!("siting-table-{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "category,weight\nindustrial,3.0\ndefault,0.0").expect("write table");

        let config = SitingConfig {
            land_use_table: Some(path.clone()),
            ..SitingConfig::default()
        };
        let locator = config.locator().expect("override loads");
        assert_eq!(
            locator
                .scorer()
                .table(crate::siting::ScoringMode::Category)
                .lookup("industrial"),
            3.0
        );

        std::fs::remove_file(path).ok();
    }
}
