//! Core implementation of chainrun
//!
//! chainrun dispatches named commands and lets the config file declare chains: a main command
//! whose members run automatically, in order, right after it finishes. Members cannot be run on
//! their own; the dispatcher refuses them with a dedicated exit status.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use log::{debug, warn};
use regex::Regex;

use crate::chain::{ChainInterceptor, ChainRegistry, registration};
use crate::commands::BUILTIN_NAMES;
use crate::commands::shell::ShellCommand;
use crate::config_file::{Config, ConfigError};
use crate::console::Application;

pub mod chain;
pub mod commands;
pub mod config_file;
pub mod console;
pub mod listing;
pub mod logger;

/// Colon separated segments without whitespace, e.g. `foo:hello`
static COMMAND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:\s]+(:[^:\s]+)*$").expect("command name pattern is valid"));

/// Load configuration from a file (or auto-detect), returning the config and its directory.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found or cannot be parsed.
pub fn load_config(config_file: Option<&str>) -> Result<(Config, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config()?,
    };
    let cwd = config_path
        .parent()
        .ok_or_else(|| ConfigError::ConfigNotFound(config_path.clone()))?
        .to_path_buf();
    debug!(
        "Loading config file: {} (cwd: {})",
        config_path.display(),
        cwd.display()
    );
    let config = Config::from_file(&config_path)?;
    validate_version(&config.chainrun_version);
    Ok((config, cwd))
}

/// Validate `config`, then build the application with its commands and chain interceptor.
///
/// Returns the registry alongside so callers can inspect the chains.
///
/// # Errors
///
/// Returns `ConfigError` if the config declares duplicate or malformed commands, or malformed
/// chain members.
pub fn bootstrap(
    config: &Config,
    cwd: &Path,
) -> Result<(Application, Arc<ChainRegistry>), ConfigError> {
    validate(config)?;

    let mut app = Application::new();
    for command in commands::builtins() {
        app.add(command);
    }
    for command in &config.commands {
        app.add(Box::new(ShellCommand::from_config(command, cwd)));
    }

    let registry = Arc::new(ChainRegistry::from_pairs(registration::collect(config)));
    app.add_listener(Box::new(ChainInterceptor::new(Arc::clone(&registry))));
    Ok((app, registry))
}

/// Warn if the config's `chainrun_version` doesn't match the binary version
fn validate_version(config_version: &str) {
    let binary_version = env!("CARGO_PKG_VERSION");
    if config_version != binary_version {
        warn!(
            "Config chainrun_version '{config_version}' differs from binary version '{binary_version}'"
        );
    }
}

/// Check command definitions and chain members before anything is registered
fn validate(config: &Config) -> Result<(), ConfigError> {
    let known = check_commands(config)?;
    check_members(config, &known)
}

fn check_commands(config: &Config) -> Result<HashSet<&str>, ConfigError> {
    let mut seen: HashSet<&str> = BUILTIN_NAMES.into_iter().collect();
    for cmd in &config.commands {
        if !COMMAND_NAME.is_match(&cmd.name) {
            return Err(ConfigError::InvalidName(cmd.name.clone()));
        }
        if !seen.insert(cmd.name.as_str()) {
            return Err(ConfigError::DuplicateName(cmd.name.clone()));
        }
        if cmd.cmd.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Command '{}' has an empty cmd string",
                cmd.name
            )));
        }
    }
    Ok(seen)
}

fn check_members(config: &Config, known: &HashSet<&str>) -> Result<(), ConfigError> {
    for entry in &config.members {
        if !known.contains(entry.command.as_str()) {
            return Err(ConfigError::UnknownCommand(entry.command.clone()));
        }
        let Some(main) = entry.main_command.as_deref() else {
            return Err(ConfigError::Validation(format!(
                "Chain member '{}' does not have a main_command",
                entry.command
            )));
        };
        if main.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Chain member '{}' has an empty main_command",
                entry.command
            )));
        }
        if !known.contains(main) {
            warn!(
                member:% = entry.command, main:% = main;
                "Chain member {} belongs to unknown command {main}, the chain will never run",
                entry.command
            );
        }
    }
    Ok(())
}
