use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};

use log::debug;

use crate::config_file::ConfigCommand;
use crate::console::{Command, CommandError, ExitStatus, Input, Output};

/// Resolve a command's working directory against the config directory.
#[must_use]
pub fn resolve_cwd(base: &Path, cwd: Option<&Path>) -> PathBuf {
    match cwd {
        None => base.to_path_buf(),
        Some(dir) if dir.as_os_str().is_empty() => base.to_path_buf(),
        Some(dir) if dir.is_relative() => base.join(dir),
        Some(dir) => dir.to_path_buf(),
    }
}

/// A configured command that runs through `sh -c`
#[derive(Debug, Clone)]
pub struct ShellCommand {
    pub name: String,
    pub description: String,
    pub cmd: String,
    pub cwd: PathBuf,
    pub env: HashMap<String, String>,
}

impl ShellCommand {
    #[must_use]
    pub fn from_config(config: &ConfigCommand, base: &Path) -> Self {
        ShellCommand {
            name: config.name.clone(),
            description: config.description.clone().unwrap_or_default(),
            cmd: config.cmd.clone(),
            cwd: resolve_cwd(base, config.cwd.as_deref()),
            env: config.env.clone().unwrap_or_default(),
        }
    }
}

impl Command for ShellCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, input: &Input, output: &mut dyn Output) -> Result<ExitStatus, CommandError> {
        debug!(command:% = self.name; "Running `{}` in {}", self.cmd, self.cwd.display());

        let stdin = if input.interactive {
            Stdio::inherit()
        } else {
            Stdio::null()
        };
        let result = ProcessCommand::new("sh")
            .arg("-c")
            .arg(&self.cmd)
            // $0 is the command name, input args become $1..$n
            .arg(&self.name)
            .args(&input.args)
            .current_dir(&self.cwd)
            .envs(&self.env)
            .stdin(stdin)
            .output()
            .map_err(|source| CommandError::Spawn {
                cmd: self.cmd.clone(),
                source,
            })?;

        for line in String::from_utf8_lossy(&result.stdout).lines() {
            output.write_line(line);
        }
        for line in String::from_utf8_lossy(&result.stderr).lines() {
            output.write_error(line);
        }

        Ok(result
            .status
            .code()
            .map_or(ExitStatus::FAILURE, ExitStatus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferedOutput;

    fn make_cmd(cmd: &str, cwd: &Path) -> ShellCommand {
        ShellCommand {
            name: "app:test".to_string(),
            description: String::new(),
            cmd: cmd.to_string(),
            cwd: cwd.to_path_buf(),
            env: HashMap::from([("GREETING".to_string(), "hey".to_string())]),
        }
    }

    #[test]
    fn test_resolve_cwd() {
        let base = Path::new("/project");
        assert_eq!(resolve_cwd(base, None), PathBuf::from("/project"));
        assert_eq!(
            resolve_cwd(base, Some(Path::new("sub"))),
            PathBuf::from("/project/sub")
        );
        assert_eq!(
            resolve_cwd(base, Some(Path::new("/elsewhere"))),
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn test_output_and_args_are_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = make_cmd("echo \"$GREETING $1\"; echo oops >&2", dir.path());
        let mut output = BufferedOutput::new();
        let status = cmd
            .execute(&Input::new(vec!["there".to_string()]).interactive(false), &mut output)
            .unwrap();
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(output.display(), "hey there\noops\n");
        assert_eq!(output.error_count(), 1);
    }

    #[test]
    fn test_exit_code_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = make_cmd("exit 3", dir.path());
        let mut output = BufferedOutput::new();
        let status = cmd.execute(&Input::empty(), &mut output).unwrap();
        assert_eq!(status, ExitStatus(3));
    }

    #[test]
    fn test_missing_cwd_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = make_cmd("true", &dir.path().join("missing"));
        let mut output = BufferedOutput::new();
        let result = cmd.execute(&Input::empty(), &mut output);
        assert!(matches!(result, Err(CommandError::Spawn { .. })));
    }
}
