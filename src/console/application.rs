use std::collections::BTreeMap;

use log::{debug, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::console::command::{Command, CommandError};
use crate::console::event::{AfterRun, BeforeRun, CommandListener};
use crate::console::output::Output;
use crate::console::{ExitStatus, Input};

/// Errors raised while resolving or invoking a command
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Command \"{0}\" is not defined.")]
    CommandNotFound(String),
    #[error("command {name} failed: {source}")]
    Command {
        name: String,
        #[source]
        source: CommandError,
    },
}

/// Lookup and invocation primitives, as seen from a listener.
pub trait Dispatcher {
    /// Resolve a command by name.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::CommandNotFound` if no command has that name.
    fn find(&self, name: &str) -> Result<&dyn Command, ConsoleError>;

    /// Run a command body directly, without firing any listener.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Command` if the body failed.
    fn invoke(
        &self,
        command: &dyn Command,
        input: &Input,
        output: &mut dyn Output,
    ) -> Result<ExitStatus, ConsoleError>;
}

/// Command table plus the listeners wrapped around every dispatch
#[derive(Default)]
pub struct Application {
    commands: BTreeMap<String, Box<dyn Command>>,
    listeners: Vec<Box<dyn CommandListener>>,
}

impl Application {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command, replacing any earlier command with the same name.
    pub fn add(&mut self, command: Box<dyn Command>) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            warn!(command:% = name; "Command {name} was defined twice, keeping the last definition");
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn CommandListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All commands, sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|command| &**command)
    }

    /// Dispatch a command by name, firing listeners around its body.
    ///
    /// Unknown commands and failing bodies are reported on `output` and turned into
    /// [`ExitStatus::FAILURE`].
    pub fn run(&self, name: &str, input: &Input, output: &mut dyn Output) -> ExitStatus {
        let invocation = Uuid::new_v4();
        let command = match self.find(name) {
            Ok(command) => command,
            Err(e) => {
                output.write_error(&e.to_string());
                return ExitStatus::FAILURE;
            }
        };
        debug!(invocation:% = invocation, command:% = name; "Dispatching {name}");

        let should_run = {
            let mut event = BeforeRun::new(invocation, Some(command.name()), &mut *output);
            for listener in &self.listeners {
                listener.before_run(&mut event);
            }
            event.command_should_run()
        };

        let status = if should_run {
            match self.invoke(command, input, &mut *output) {
                Ok(status) => status,
                Err(e) => {
                    output.write_error(&e.to_string());
                    ExitStatus::FAILURE
                }
            }
        } else {
            debug!(invocation:% = invocation, command:% = name; "{name} was disabled by a listener");
            ExitStatus::DISABLED
        };

        let mut event = AfterRun::new(
            invocation,
            Some(command.name()),
            Some(self),
            &mut *output,
            status,
        );
        for listener in &self.listeners {
            listener.after_run(&mut event);
        }
        debug!(invocation:% = invocation, command:% = name, status:% = status; "{name} finished");

        status
    }
}

impl Dispatcher for Application {
    fn find(&self, name: &str) -> Result<&dyn Command, ConsoleError> {
        self.commands
            .get(name)
            .map(|command| &**command)
            .ok_or_else(|| ConsoleError::CommandNotFound(name.to_string()))
    }

    fn invoke(
        &self,
        command: &dyn Command,
        input: &Input,
        output: &mut dyn Output,
    ) -> Result<ExitStatus, ConsoleError> {
        command
            .execute(input, output)
            .map_err(|source| ConsoleError::Command {
                name: command.name().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::console::output::BufferedOutput;

    struct Echo {
        name: &'static str,
        fail: bool,
    }

    impl Command for Echo {
        fn name(&self) -> &str {
            self.name
        }

        fn execute(
            &self,
            _input: &Input,
            output: &mut dyn Output,
        ) -> Result<ExitStatus, CommandError> {
            if self.fail {
                return Err(CommandError::Failed("boom".to_string()));
            }
            output.write_line(&format!("ran {}", self.name));
            Ok(ExitStatus::SUCCESS)
        }
    }

    /// Records every event and optionally disables one command.
    struct Recorder {
        disable: Option<&'static str>,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl CommandListener for Recorder {
        fn before_run(&self, event: &mut BeforeRun<'_>) {
            let name = event.command().unwrap_or_default();
            self.seen.borrow_mut().push(format!("before {name}"));
            if self.disable == Some(name) {
                event.disable_command();
            }
        }

        fn after_run(&self, event: &mut AfterRun<'_>) {
            assert!(event.application().is_some());
            self.seen.borrow_mut().push(format!(
                "after {} {}",
                event.command().unwrap_or_default(),
                event.exit_status()
            ));
        }
    }

    fn make_app(disable: Option<&'static str>) -> (Application, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut app = Application::new();
        app.add(Box::new(Echo {
            name: "ok",
            fail: false,
        }));
        app.add(Box::new(Echo {
            name: "broken",
            fail: true,
        }));
        app.add_listener(Box::new(Recorder {
            disable,
            seen: Rc::clone(&seen),
        }));
        (app, seen)
    }

    #[test]
    fn test_run_fires_hooks_around_body() {
        let (app, seen) = make_app(None);
        let mut output = BufferedOutput::new();
        let status = app.run("ok", &Input::empty(), &mut output);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(output.display(), "ran ok\n");
        assert_eq!(*seen.borrow(), vec!["before ok", "after ok 0"]);
    }

    #[test]
    fn test_disabled_command_skips_body() {
        let (app, seen) = make_app(Some("ok"));
        let mut output = BufferedOutput::new();
        let status = app.run("ok", &Input::empty(), &mut output);
        assert_eq!(status, ExitStatus::DISABLED);
        assert!(output.display().is_empty());
        assert_eq!(*seen.borrow(), vec!["before ok", "after ok 113"]);
    }

    #[test]
    fn test_failing_body_still_fires_after_hook() {
        let (app, seen) = make_app(None);
        let mut output = BufferedOutput::new();
        let status = app.run("broken", &Input::empty(), &mut output);
        assert_eq!(status, ExitStatus::FAILURE);
        assert!(output.display().contains("boom"));
        assert_eq!(*seen.borrow(), vec!["before broken", "after broken 1"]);
    }

    #[test]
    fn test_unknown_command() {
        let (app, seen) = make_app(None);
        let mut output = BufferedOutput::new();
        let status = app.run("missing", &Input::empty(), &mut output);
        assert_eq!(status, ExitStatus::FAILURE);
        assert_eq!(output.display(), "Command \"missing\" is not defined.\n");
        assert!(seen.borrow().is_empty());
        assert!(matches!(
            app.find("missing"),
            Err(ConsoleError::CommandNotFound(name)) if name == "missing"
        ));
    }
}
