//! Configuration file handling for chainrun

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found in current directory or its parents: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Duplicate command name in config: {0}")]
    DuplicateName(String),
    #[error("Invalid command name `{0}`")]
    InvalidName(String),
    #[error("Chain member `{0}` is not a known command")]
    UnknownCommand(String),
    #[error("Invalid config: {0}")]
    Validation(String),
}

/// A shell command added to the application
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConfigCommand {
    pub name: String,
    pub description: Option<String>,
    pub cmd: String,
    pub cwd: Option<PathBuf>,
    pub env: Option<HashMap<String, String>>,
}

/// Declares `command` a member of the chain of `main_command`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConfigMember {
    pub command: String,
    pub main_command: Option<String>,
}

/// Root configuration structure for chainrun
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub chainrun_version: String,
    #[serde(default)]
    pub commands: Vec<ConfigCommand>,
    #[serde(default)]
    pub members: Vec<ConfigMember>,
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".chainrun.json", ".chainrun.yaml", ".chainrun.yml"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a configuration file in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ConfigError::ConfigNotFound` if no config file is found.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        Self::find_config_from(&cwd)
    }

    /// Searches for a configuration file in `start` and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if no config file is found.
    pub fn find_config_from(start: &Path) -> Result<PathBuf, ConfigError> {
        let mut path = start.to_path_buf();
        debug!("Searching for config file in {}", start.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Ok(config_path);
                }
            }
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(start.to_path_buf()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".chainrun.json");
        std::fs::write(
            &path,
            r#"{
                "chainrun_version": "0.1.0",
                "commands": [{"name": "app:test", "cmd": "echo hello"}],
                "members": [{"command": "app:test", "main_command": "foo:hello"}]
            }"#,
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.commands[0].name, "app:test");
        assert_eq!(config.members[0].main_command.as_deref(), Some("foo:hello"));
    }

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".chainrun.yaml");
        std::fs::write(
            &path,
            "chainrun_version: '0.1.0'\ncommands:\n  - name: app:test\n    cmd: echo hello\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.commands[0].cmd, "echo hello");
        assert!(config.members.is_empty());
    }

    #[test]
    fn test_yaml_error_preserves_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".chainrun.yaml");
        std::fs::write(&path, "commands: [not: valid: yaml").unwrap();
        match Config::from_file(&path) {
            Err(ConfigError::Yaml { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ConfigError::Yaml, got: {other:?}"),
        }
    }

    #[test]
    fn test_find_config_searches_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".chainrun.yml"), "chainrun_version: '0.1.0'\n").unwrap();
        let found = Config::find_config_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".chainrun.yml"));
    }
}
