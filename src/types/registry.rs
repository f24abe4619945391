use std::collections::HashMap;

use super::error::GrammarError;
use super::rule::Rule;

/// How many fresh candidates are drawn before giving up on a prefix.
pub(crate) const MAX_NAME_ATTEMPTS: usize = 16;

/// Maps rule names to rules.
///
/// Populated while a grammar is built; references are resolved against it
/// lazily at parse time, which is what makes forward references and
/// recursion possible.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    rules: HashMap<String, Rule>,
}

impl NameRegistry {
    /// Bind `rule` to `name`, replacing any previous binding.
    pub(crate) fn register(&mut self, name: &str, rule: Rule) {
        self.rules.insert(name.to_owned(), rule);
    }

    /// Look up the rule bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// The number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Bound names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all (name, rule) bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Mint a name of the form `prefix-<hex>` that is not yet bound, drawing
    /// candidates from `draw`.
    pub(crate) fn fresh_name_with(
        &self,
        prefix: &str,
        attempts: usize,
        mut draw: impl FnMut() -> u64,
    ) -> Result<String, GrammarError> {
        for _ in 0..attempts {
            let candidate = format!("{prefix}-{:016x}", draw());
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(GrammarError::NameExhausted {
            prefix: prefix.to_owned(),
            attempts,
        })
    }
}
