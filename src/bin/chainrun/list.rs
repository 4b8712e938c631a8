use std::process::ExitCode;

use chainrun::chain::ChainRegistry;
use chainrun::console::Application;

pub fn run(app: &Application, registry: &ChainRegistry) -> ExitCode {
    print!("{}", chainrun::listing::render(app, registry));
    ExitCode::SUCCESS
}
