use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Args;

use chainrun::console::{Application, ConsoleOutput, Input};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Name of the command to run, e.g. foo:hello
    name: String,

    /// Arguments passed on to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Dispatch a single command. Chain members blocked from running on their own exit with 113.
pub fn run(args: &RunArgs, app: &Application) -> ExitCode {
    let input = Input::new(args.args.clone()).interactive(std::io::stdin().is_terminal());
    let mut output = ConsoleOutput::stdout();
    app.run(&args.name, &input, &mut output).into()
}
