//! Commands the application can dispatch
//!
//! Two builtin demo commands are always present. Every other command comes from the `commands`
//! section of the config file and runs through the shell.

use crate::console::Command;

pub mod demo;
pub mod shell;

/// Names of the commands every application starts with.
pub const BUILTIN_NAMES: [&str; 2] = ["foo:hello", "bar:hi"];

#[must_use]
pub fn builtins() -> Vec<Box<dyn Command>> {
    vec![Box::new(demo::HelloCommand), Box::new(demo::HiCommand)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_match_commands() {
        let names: Vec<String> = builtins().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, BUILTIN_NAMES);
    }
}
