//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

use taskify_core::ControllerConfig;
use tracing::warn;

const DEFAULT_DATA_DIR: &str = ".taskify-data";
const TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `tasks.json`
    pub data_dir: PathBuf,
    /// Keep tasks in memory only
    pub in_memory: bool,
    pub search_debounce: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = get("TASKIFY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let in_memory = get("TASKIFY_IN_MEMORY")
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let default_debounce = ControllerConfig::default().search_debounce;
        let search_debounce = match get("TASKIFY_SEARCH_DEBOUNCE_MS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    warn!("Ignoring invalid TASKIFY_SEARCH_DEBOUNCE_MS={:?}", raw);
                    default_debounce
                }
            },
            None => default_debounce,
        };

        Self {
            data_dir,
            in_memory,
            search_debounce,
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            search_debounce: self.search_debounce,
            ..ControllerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from(".taskify-data"));
        assert!(!config.in_memory);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.tasks_path(), PathBuf::from(".taskify-data/tasks.json"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TASKIFY_DATA_DIR", "/tmp/taskify"),
            ("TASKIFY_IN_MEMORY", "TRUE"),
            ("TASKIFY_SEARCH_DEBOUNCE_MS", "50"),
        ]);
        assert_eq!(config.tasks_path(), PathBuf::from("/tmp/taskify/tasks.json"));
        assert!(config.in_memory);
        assert_eq!(config.controller().search_debounce, Duration::from_millis(50));
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = config_from(&[
            ("TASKIFY_DATA_DIR", "   "),
            ("TASKIFY_SEARCH_DEBOUNCE_MS", "soon"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from(".taskify-data"));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }
}
