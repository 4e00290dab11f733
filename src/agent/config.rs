// File surfer configuration

use crate::browser::viewport::DEFAULT_VIEWPORT_SIZE;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_NAME: &str = "FileSurfer";
pub const DEFAULT_DESCRIPTION: &str = "An agent that can handle local files.";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI Assistant. \
When given a user query, use available functions to help the user with their request.";

/// File surfer agent configuration
#[derive(Debug, Clone)]
pub struct SurferConfig {
    /// Agent name, used as the source of its messages
    pub name: String,
    /// Description shown to other chat participants
    pub description: String,
    /// Root directory for relative paths
    pub base_path: PathBuf,
    /// Characters per viewport page
    pub viewport_size: usize,
    pub system_prompt: String,
    /// Path to tools.toml description overrides
    pub tools_toml_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum SurferConfigError {
    #[error("Config missing: {0}")]
    ConfigMissing(String),

    #[error("Invalid config: {0}")]
    ConfigInvalid(String),
}

/// Parse a variable, logging a warning if the value is present but invalid.
fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        Some(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        None => default,
    }
}

impl SurferConfig {
    /// Configuration with defaults for everything but the base path
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            base_path: base_path.into(),
            viewport_size: DEFAULT_VIEWPORT_SIZE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            tools_toml_path: PathBuf::from("tools.toml"),
        }
    }

    /// Load from environment variables. `base_path` takes precedence over SURFER_BASE_PATH;
    /// one of the two is required.
    pub fn load(base_path: Option<PathBuf>) -> Result<Self, SurferConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(base_path, |name| std::env::var(name).ok())
    }

    fn from_lookup(
        base_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SurferConfigError> {
        let base_path = base_path
            .or_else(|| lookup("SURFER_BASE_PATH").map(PathBuf::from))
            .ok_or_else(|| SurferConfigError::ConfigMissing("SURFER_BASE_PATH".into()))?;

        let base_path = std::fs::canonicalize(&base_path).map_err(|e| {
            SurferConfigError::ConfigInvalid(format!(
                "base path '{}' is not accessible: {}",
                base_path.display(),
                e
            ))
        })?;
        if !base_path.is_dir() {
            return Err(SurferConfigError::ConfigInvalid(format!(
                "base path '{}' is not a directory",
                base_path.display()
            )));
        }

        let mut config = SurferConfig::new(base_path);

        config.viewport_size = parse_var(&lookup, "SURFER_VIEWPORT_SIZE", config.viewport_size);
        if config.viewport_size == 0 {
            return Err(SurferConfigError::ConfigInvalid(
                "SURFER_VIEWPORT_SIZE must be greater than zero".into(),
            ));
        }

        if let Some(name) = lookup("SURFER_NAME") {
            config.name = name;
        }
        if let Some(description) = lookup("SURFER_DESCRIPTION") {
            config.description = description;
        }
        if let Some(prompt) = lookup("SURFER_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }
        if let Some(path) = lookup("SURFER_TOOLS_TOML") {
            config.tools_toml_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_base_path_is_required() {
        let err = SurferConfig::from_lookup(None, lookup(&[])).unwrap_err();
        assert!(matches!(err, SurferConfigError::ConfigMissing(ref v) if v == "SURFER_BASE_PATH"));
    }

    #[test]
    fn test_defaults_from_env_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();

        let config = SurferConfig::from_lookup(None, lookup(&[("SURFER_BASE_PATH", base)])).unwrap();
        assert_eq!(config.base_path, std::fs::canonicalize(dir.path()).unwrap());
        assert_eq!(config.viewport_size, 5120);
        assert_eq!(config.name, "FileSurfer");
        assert_eq!(config.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_override_beats_env() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();

        let config = SurferConfig::from_lookup(
            Some(b.path().to_path_buf()),
            lookup(&[
                ("SURFER_BASE_PATH", a.path().to_str().unwrap()),
                ("SURFER_VIEWPORT_SIZE", "100"),
                ("SURFER_NAME", "Surfer"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_path, std::fs::canonicalize(b.path()).unwrap());
        assert_eq!(config.viewport_size, 100);
        assert_eq!(config.name, "Surfer");
    }

    #[test]
    fn test_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let base = Some(dir.path().to_path_buf());

        let config =
            SurferConfig::from_lookup(base.clone(), lookup(&[("SURFER_VIEWPORT_SIZE", "big")]))
                .unwrap();
        assert_eq!(config.viewport_size, DEFAULT_VIEWPORT_SIZE);

        let err = SurferConfig::from_lookup(base, lookup(&[("SURFER_VIEWPORT_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(err, SurferConfigError::ConfigInvalid(_)));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = SurferConfig::from_lookup(Some(file), lookup(&[])).unwrap_err();
        assert!(matches!(err, SurferConfigError::ConfigInvalid(_)));

        let err = SurferConfig::from_lookup(Some(dir.path().join("missing")), lookup(&[]))
            .unwrap_err();
        assert!(matches!(err, SurferConfigError::ConfigInvalid(_)));
    }
}
