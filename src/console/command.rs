use thiserror::Error;

use crate::console::output::Output;
use crate::console::{ExitStatus, Input};

/// Errors a command body can fail with
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to spawn `{cmd}`: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Failed(String),
}

/// A named, invocable command.
pub trait Command {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Run the command body.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the body could not run to completion.
    fn execute(&self, input: &Input, output: &mut dyn Output) -> Result<ExitStatus, CommandError>;
}
