use std::env;
use std::fmt;
use std::num::ParseIntError;

/// Distinguishes runtime behavior for different stages of the application.
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

/// Top-level configuration for the engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub boards: BoardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SEMINAR_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("SEMINAR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let board_count = env::var("SEMINAR_BOARD_COUNT")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u32>()
            .map_err(|source| ConfigError::InvalidBoardCount { source })?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            boards: BoardConfig { count: board_count },
        })
    }
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Size of the enumerable poster board space.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub count: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBoardCount { source: ParseIntError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBoardCount { .. } => {
                write!(f, "SEMINAR_BOARD_COUNT must be a valid u32")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBoardCount { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("SEMINAR_ENV");
        env::remove_var("SEMINAR_LOG_LEVEL");
        env::remove_var("SEMINAR_BOARD_COUNT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.boards.count, 100);
    }

    #[test]
    fn load_reads_environment_and_board_count() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SEMINAR_ENV", "production");
        env::set_var("SEMINAR_BOARD_COUNT", "24");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.boards.count, 24);
        reset_env();
    }

    #[test]
    fn load_rejects_non_numeric_board_count() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SEMINAR_BOARD_COUNT", "plenty");
        let error = AppConfig::load().expect_err("invalid count rejected");
        assert!(matches!(error, ConfigError::InvalidBoardCount { .. }));
        reset_env();
    }
}
