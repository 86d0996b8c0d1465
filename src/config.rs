//! Runtime configuration read from `BODYSCOPE_*` environment variables.
//!
//! The environment is read once, at process start, and the resulting
//! `AppConfig` is passed to whatever needs it.

use std::path::PathBuf;

use crate::BodyscopeError;

pub const MODEL_PATH_ENV: &str = "BODYSCOPE_MODEL_PATH";
pub const MODEL_SHA256_ENV: &str = "BODYSCOPE_MODEL_SHA256";
pub const DB_PATH_ENV: &str = "BODYSCOPE_DB_PATH";
pub const PERSIST_ENV: &str = "BODYSCOPE_PERSIST";
pub const LOG_MODE_ENV: &str = "BODYSCOPE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "BODYSCOPE_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models/obesity_model.json";
const DEFAULT_DB_PATH: &str = "bodyscope.db";
const DEFAULT_LOG_FILE: &str = "bodyscope.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stderr,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    /// Hex SHA-256 the model file must match, if pinned
    pub model_sha256: Option<String>,
    pub db_path: PathBuf,
    pub persist: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            persist: true,
            log_mode: LogMode::Stderr,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Build from the process environment.
    ///
    /// # Errors
    /// Returns `BodyscopeError::Config` for unparseable values.
    pub fn from_env() -> Result<Self, BodyscopeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Unset and blank variables fall back to defaults.
    ///
    /// # Errors
    /// Returns `BodyscopeError::Config` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BodyscopeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(MODEL_PATH_ENV) {
            config.model_path = PathBuf::from(path);
        }
        if let Some(digest) = get(MODEL_SHA256_ENV) {
            if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(BodyscopeError::Config(format!(
                    "{MODEL_SHA256_ENV} must be 64 hex characters"
                )));
            }
            config.model_sha256 = Some(digest.to_ascii_lowercase());
        }
        if let Some(path) = get(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(flag) = get(PERSIST_ENV) {
            config.persist = match flag.as_str() {
                "1" | "true" | "TRUE" | "yes" | "YES" => true,
                "0" | "false" | "FALSE" | "no" | "NO" => false,
                other => {
                    return Err(BodyscopeError::Config(format!(
                        "{PERSIST_ENV} must be true or false, got {other:?}"
                    )))
                }
            };
        }
        if let Some(mode) = get(LOG_MODE_ENV) {
            config.log_mode = match mode.as_str() {
                "stderr" => LogMode::Stderr,
                "file" => LogMode::File,
                other => {
                    return Err(BodyscopeError::Config(format!(
                        "{LOG_MODE_ENV} must be stderr or file, got {other:?}"
                    )))
                }
            };
        }
        if let Some(path) = get(LOG_FILE_ENV) {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, BodyscopeError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("Should build");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_path, PathBuf::from("models/obesity_model.json"));
        assert!(config.persist);
        assert_eq!(config.log_mode, LogMode::Stderr);
    }

    #[test]
    fn test_overrides() {
        let digest = "AB".repeat(32);
        let config = config_from(&[
            (MODEL_PATH_ENV, "/srv/model.json"),
            (MODEL_SHA256_ENV, &digest),
            (DB_PATH_ENV, ":memory:"),
            (PERSIST_ENV, "no"),
            (LOG_MODE_ENV, "file"),
            (LOG_FILE_ENV, "/tmp/bodyscope.log"),
        ])
        .expect("Should build");

        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.model_sha256, Some("ab".repeat(32)));
        assert_eq!(config.db_path, PathBuf::from(":memory:"));
        assert!(!config.persist);
        assert_eq!(config.log_mode, LogMode::File);
        assert_eq!(config.log_file, PathBuf::from("/tmp/bodyscope.log"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[(DB_PATH_ENV, "  "), (PERSIST_ENV, "")]).expect("Should build");
        assert_eq!(config.db_path, PathBuf::from("bodyscope.db"));
        assert!(config.persist);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            config_from(&[(PERSIST_ENV, "sometimes")]),
            Err(BodyscopeError::Config(_))
        ));
        assert!(matches!(
            config_from(&[(MODEL_SHA256_ENV, "abc123")]),
            Err(BodyscopeError::Config(_))
        ));
        assert!(matches!(
            config_from(&[(LOG_MODE_ENV, "syslog")]),
            Err(BodyscopeError::Config(_))
        ));
    }
}
