use std::fmt::Write;

use crate::chain::ChainRegistry;
use crate::console::Application;

/// Render the command table shown by `chainrun list`.
#[must_use]
pub fn render(app: &Application, registry: &ChainRegistry) -> String {
    let width = app.commands().map(|c| c.name().len()).max().unwrap_or(0);
    let mut out = String::from("Available commands:\n");
    for command in app.commands() {
        let name = command.name();
        let mut row = format!("  {name:<width$}  {}", command.description());
        if let Some(main) = registry.main_of(name) {
            let _ = write!(row, " (member of {main})");
        } else if registry.is_main(name) {
            let _ = write!(row, " (chain: {})", registry.members_of(name).join(", "));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands;

    #[test]
    fn test_render_annotates_chains() {
        let mut app = Application::new();
        for command in commands::builtins() {
            app.add(command);
        }
        let registry = ChainRegistry::from_pairs([("foo:hello", "bar:hi")]);
        let listing = render(&app, &registry);
        insta::assert_snapshot!(listing.trim_end(), @r"
        Available commands:
          bar:hi     Says hi from Bar (member of foo:hello)
          foo:hello  Says hello from Foo (chain: bar:hi)
        ");
    }
}
