use uuid::Uuid;

use crate::console::ExitStatus;
use crate::console::application::Dispatcher;
use crate::console::output::Output;

/// Receives the lifecycle events of every dispatched command.
pub trait CommandListener {
    /// Called before the command body runs. May disable the invocation.
    fn before_run(&self, event: &mut BeforeRun<'_>);

    /// Called once after the invocation finished, whatever its outcome.
    fn after_run(&self, event: &mut AfterRun<'_>);
}

/// State of an invocation that is about to run
pub struct BeforeRun<'a> {
    invocation: Uuid,
    command: Option<&'a str>,
    output: &'a mut dyn Output,
    disabled: bool,
}

impl<'a> BeforeRun<'a> {
    #[must_use]
    pub fn new(invocation: Uuid, command: Option<&'a str>, output: &'a mut dyn Output) -> Self {
        Self {
            invocation,
            command,
            output,
            disabled: false,
        }
    }

    #[must_use]
    pub fn invocation(&self) -> Uuid {
        self.invocation
    }

    #[must_use]
    pub fn command(&self) -> Option<&'a str> {
        self.command
    }

    pub fn output(&mut self) -> &mut dyn Output {
        &mut *self.output
    }

    /// Skip the command body. The dispatcher reports [`ExitStatus::DISABLED`].
    pub fn disable_command(&mut self) {
        self.disabled = true;
    }

    #[must_use]
    pub fn command_should_run(&self) -> bool {
        !self.disabled
    }
}

/// State of an invocation that has finished
pub struct AfterRun<'a> {
    invocation: Uuid,
    command: Option<&'a str>,
    application: Option<&'a dyn Dispatcher>,
    output: &'a mut dyn Output,
    exit_status: ExitStatus,
}

impl<'a> AfterRun<'a> {
    #[must_use]
    pub fn new(
        invocation: Uuid,
        command: Option<&'a str>,
        application: Option<&'a dyn Dispatcher>,
        output: &'a mut dyn Output,
        exit_status: ExitStatus,
    ) -> Self {
        Self {
            invocation,
            command,
            application,
            output,
            exit_status,
        }
    }

    #[must_use]
    pub fn invocation(&self) -> Uuid {
        self.invocation
    }

    #[must_use]
    pub fn command(&self) -> Option<&'a str> {
        self.command
    }

    /// The dispatcher that ran the command, if it ran inside one.
    #[must_use]
    pub fn application(&self) -> Option<&'a dyn Dispatcher> {
        self.application
    }

    pub fn output(&mut self) -> &mut dyn Output {
        &mut *self.output
    }

    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }
}
