use crate::config_file::Config;

/// Collect the `(main, member)` pairs declared by a validated config, in file order.
///
/// Entries without a `main_command` are skipped; validation rejects them before this runs.
#[must_use]
pub fn collect(config: &Config) -> Vec<(String, String)> {
    config
        .members
        .iter()
        .filter_map(|entry| {
            entry
                .main_command
                .as_ref()
                .map(|main| (main.clone(), entry.command.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::ConfigMember;

    fn member(command: &str, main: Option<&str>) -> ConfigMember {
        ConfigMember {
            command: command.to_string(),
            main_command: main.map(str::to_string),
        }
    }

    #[test]
    fn test_collect_keeps_file_order() {
        let config = Config {
            members: vec![
                member("bar:hi", Some("foo:hello")),
                member("baz:yo", Some("foo:hello")),
                member("orphan", None),
            ],
            ..Default::default()
        };
        assert_eq!(
            collect(&config),
            vec![
                ("foo:hello".to_string(), "bar:hi".to_string()),
                ("foo:hello".to_string(), "baz:yo".to_string()),
            ]
        );
    }
}
