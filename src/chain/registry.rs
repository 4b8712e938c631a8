use std::collections::{BTreeMap, HashMap};

use log::{info, warn};

/// Bidirectional mapping between main commands and the members of their chain.
///
/// Members keep their registration order, which is also their execution order. A member belongs to
/// at most one main command: registering it under another main re-points the reverse mapping and
/// leaves the earlier chain's list untouched.
#[derive(Debug, Default, Clone)]
pub struct ChainRegistry {
    /// main command => member commands, in registration order
    chains: BTreeMap<String, Vec<String>>,
    /// member command => main command
    member_to_main: HashMap<String, String>,
}

impl ChainRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(main, member)` pairs, registered in iteration order.
    pub fn from_pairs<I, M, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (M, N)>,
        M: AsRef<str>,
        N: AsRef<str>,
    {
        let mut registry = Self::new();
        for (main, member) in pairs {
            registry.register_member(main.as_ref(), member.as_ref());
        }
        registry
    }

    /// Append `member` to the chain of `main`.
    ///
    /// A command registered as a member of itself is ignored. Registering the same pair twice runs
    /// the member twice.
    pub fn register_member(&mut self, main: &str, member: &str) {
        if main == member {
            warn!(command:% = main; "Attempted to register command {main} as a member of itself");
            return;
        }

        if let Some(previous) = self.member_to_main.get(member)
            && previous != main
        {
            warn!(
                member:% = member, previous:% = previous, main:% = main;
                "{member} was already a member of {previous} command chain, it now belongs to {main}"
            );
        }

        self.chains
            .entry(main.to_string())
            .or_default()
            .push(member.to_string());
        self.member_to_main
            .insert(member.to_string(), main.to_string());

        info!(
            member:% = member, main:% = main;
            "{member} registered as a member of {main} command chain"
        );
    }

    #[must_use]
    pub fn is_member(&self, command: &str) -> bool {
        self.member_to_main.contains_key(command)
    }

    #[must_use]
    pub fn is_main(&self, command: &str) -> bool {
        self.chains
            .get(command)
            .is_some_and(|members| !members.is_empty())
    }

    /// Members of the chain of `main`, empty if it has none.
    #[must_use]
    pub fn members_of(&self, main: &str) -> &[String] {
        self.chains.get(main).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn main_of(&self, member: &str) -> Option<&str> {
        self.member_to_main.get(member).map(String::as_str)
    }

    /// All chains, sorted by main command.
    pub fn chains(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.chains
            .iter()
            .map(|(main, members)| (main.as_str(), members.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
