use log::info;

use crate::console::{Command, CommandError, ExitStatus, Input, Output};

/// Prints "Hello from Foo!"
pub struct HelloCommand;

impl Command for HelloCommand {
    fn name(&self) -> &str {
        "foo:hello"
    }

    fn description(&self) -> &str {
        "Says hello from Foo"
    }

    fn execute(&self, _input: &Input, output: &mut dyn Output) -> Result<ExitStatus, CommandError> {
        let message = "Hello from Foo!";
        output.write_line(message);
        info!("{message}");
        Ok(ExitStatus::SUCCESS)
    }
}

/// Prints "Hi from Bar!"
pub struct HiCommand;

impl Command for HiCommand {
    fn name(&self) -> &str {
        "bar:hi"
    }

    fn description(&self) -> &str {
        "Says hi from Bar"
    }

    fn execute(&self, _input: &Input, output: &mut dyn Output) -> Result<ExitStatus, CommandError> {
        let message = "Hi from Bar!";
        output.write_line(message);
        info!("{message}");
        Ok(ExitStatus::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferedOutput;

    #[test]
    fn test_demo_commands_print() {
        let mut output = BufferedOutput::new();
        let status = HelloCommand.execute(&Input::empty(), &mut output).unwrap();
        assert_eq!(status, ExitStatus::SUCCESS);
        HiCommand.execute(&Input::empty(), &mut output).unwrap();
        assert_eq!(output.display(), "Hello from Foo!\nHi from Bar!\n");
    }
}
