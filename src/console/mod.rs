//! Minimal console dispatcher that chained commands run on
//!
//! An [`Application`](application::Application) owns a table of named commands and a list of
//! lifecycle listeners. Every dispatch fires the listeners' before-hook, runs the command body unless
//! a listener disabled it, then fires the after-hook exactly once with the resulting exit status.

use std::fmt;
use std::process::ExitCode;

pub mod application;
pub mod command;
pub mod event;
pub mod output;

pub use application::{Application, ConsoleError, Dispatcher};
pub use command::{Command, CommandError};
pub use event::{AfterRun, BeforeRun, CommandListener};
pub use output::{BufferedOutput, ConsoleOutput, Output};

/// Exit status of a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const FAILURE: ExitStatus = ExitStatus(1);
    /// Reserved for invocations a listener disabled before the body ran.
    pub const DISABLED: ExitStatus = ExitStatus(113);

    #[must_use]
    pub fn code(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        u8::try_from(status.0).map_or(ExitCode::FAILURE, ExitCode::from)
    }
}

/// Arguments handed to a command body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    pub args: Vec<String>,
    pub interactive: bool,
}

impl Input {
    #[must_use]
    pub fn new(args: Vec<String>) -> Self {
        Input {
            args,
            interactive: true,
        }
    }

    /// No arguments and no prompting, the input chain members run with.
    #[must_use]
    pub fn empty() -> Self {
        Input::default()
    }

    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}
