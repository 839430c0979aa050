use crate::error::{Result, TableGenError};
use adjacency::constants::MAX_DP_WIDTH;
use std::{env, path::PathBuf};

const ENV_OUTPUT_DIR: &str = "TABLE_GEN_OUTPUT_DIR";
const ENV_MAX_ROWS: &str = "TABLE_GEN_MAX_ROWS";
const ENV_MAX_COLS: &str = "TABLE_GEN_MAX_COLS";
const ENV_THREADS: &str = "TABLE_GEN_THREADS";

const DEFAULT_OUTPUT_DIR: &str = "tables";
const DEFAULT_MAX_ROWS: u64 = 10;
const DEFAULT_MAX_COLS: u64 = 20;
// cores left free for the rest of the machine
const RESERVED_CORES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output_dir: PathBuf,
    pub max_rows: u64,
    pub max_cols: u64,
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            threads: default_threads(),
        }
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(RESERVED_CORES)
        .max(1)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`; unset or blank values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(output_dir) = get(ENV_OUTPUT_DIR) {
            let path = PathBuf::from(output_dir.trim());

            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(TableGenError::InvalidConfiguration(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            config.output_dir = path;
        }
        if let Some(v) = get(ENV_MAX_ROWS) {
            config.max_rows = parse_number(ENV_MAX_ROWS, &v)?;
        }
        if let Some(v) = get(ENV_MAX_COLS) {
            config.max_cols = parse_number(ENV_MAX_COLS, &v)?;
        }
        if let Some(v) = get(ENV_THREADS) {
            config.threads = parse_number(ENV_THREADS, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 || self.max_cols == 0 {
            return Err(TableGenError::InvalidConfiguration(
                "max rows and max cols must be at least 1".to_string(),
            ));
        }
        if self.max_rows > MAX_DP_WIDTH {
            return Err(TableGenError::InvalidConfiguration(format!(
                "max rows must be at most {MAX_DP_WIDTH}, got {}",
                self.max_rows
            )));
        }
        if self.threads == 0 {
            return Err(TableGenError::InvalidConfiguration(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        TableGenError::InvalidConfiguration(format!("{key} must be a positive integer, got '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("tables"));
        assert_eq!(config.max_rows, 10);
        assert_eq!(config.max_cols, 20);
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_string_lossy().into_owned();
        let config = Config::from_lookup(lookup(&[
            (ENV_OUTPUT_DIR, dir.as_str()),
            (ENV_MAX_ROWS, "4"),
            (ENV_MAX_COLS, " 6 "),
            (ENV_THREADS, "2"),
        ]))
        .unwrap();
        assert_eq!(config.output_dir, temp_dir.path());
        assert_eq!((config.max_rows, config.max_cols, config.threads), (4, 6, 2));
    }

    #[test]
    fn test_whitespace_only_keeps_default() {
        let config = Config::from_lookup(lookup(&[(ENV_OUTPUT_DIR, "   \t\n   ")])).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("tables"));
    }

    #[test]
    fn test_output_path_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not_a_dir");
        std::fs::write(&file, "x").unwrap();
        let path = file.to_string_lossy().into_owned();
        assert!(matches!(
            Config::from_lookup(lookup(&[(ENV_OUTPUT_DIR, path.as_str())])),
            Err(TableGenError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(Config::from_lookup(lookup(&[(ENV_MAX_ROWS, "ten")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_MAX_ROWS, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_MAX_ROWS, "17")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_THREADS, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_MAX_COLS, "-1")])).is_err());
    }
}
