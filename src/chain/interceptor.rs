use std::sync::Arc;

use log::{error, info, warn};

use crate::chain::registry::ChainRegistry;
use crate::console::{AfterRun, BeforeRun, CommandListener, ConsoleError, Dispatcher, Input, Output};

/// Blocks direct invocation of chain members and runs them after their main command.
///
/// Members run through the dispatcher's own `find` and `invoke`, so they never pass through the
/// listeners again.
pub struct ChainInterceptor {
    registry: Arc<ChainRegistry>,
}

impl ChainInterceptor {
    #[must_use]
    pub fn new(registry: Arc<ChainRegistry>) -> Self {
        Self { registry }
    }

    fn run_member(
        application: &dyn Dispatcher,
        member: &str,
        output: &mut dyn Output,
    ) -> Result<(), ConsoleError> {
        let command = application.find(member)?;
        let status = application.invoke(command, &Input::empty(), output)?;
        if !status.is_success() {
            warn!(member:% = member, status:% = status; "Chain member {member} exited with status {status}");
        }
        Ok(())
    }
}

impl CommandListener for ChainInterceptor {
    fn before_run(&self, event: &mut BeforeRun<'_>) {
        let Some(command) = event.command().filter(|name| !name.is_empty()) else {
            return;
        };

        if self.registry.is_member(command) {
            let main = self.registry.main_of(command).unwrap_or_default();
            let message = format!(
                "Error: {command} command is a member of {main} command chain and cannot be executed on its own."
            );
            event.output().write_error(&message);
            error!(command:% = command, main:% = main; "{message}");
            event.disable_command();
            return;
        }

        if self.registry.is_main(command) {
            info!(
                command:% = command;
                "{command} is a master command of a command chain that has registered member commands"
            );
            for member in self.registry.members_of(command) {
                info!(
                    member:% = member, main:% = command;
                    "{member} registered as a member of {command} command chain"
                );
            }
            info!(command:% = command; "Executing {command} command itself first:");
        }
    }

    fn after_run(&self, event: &mut AfterRun<'_>) {
        let Some(command) = event.command().filter(|name| !name.is_empty()) else {
            return;
        };
        if !self.registry.is_main(command) {
            return;
        }
        let members = self.registry.members_of(command);
        if members.is_empty() {
            return;
        }

        let invocation = event.invocation();
        info!(command:% = command, invocation:% = invocation; "Executing {command} chain members:");

        let Some(application) = event.application() else {
            error!(
                command:% = command, invocation:% = invocation;
                "Cannot execute chain members: no console application available"
            );
            return;
        };

        let output = event.output();
        for member in members {
            if let Err(e) = Self::run_member(application, member, output) {
                error!(
                    member:% = member, main:% = command, error:% = e;
                    "Error executing chain member {member}: {e}"
                );
            }
        }

        info!(command:% = command, invocation:% = invocation; "Execution of {command} chain completed.");
    }
}
