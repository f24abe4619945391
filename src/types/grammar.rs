use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use tracing::debug;

use super::error::GrammarError;
use super::registry::{NameRegistry, MAX_NAME_ATTEMPTS};
use super::rule::{
    alternative, bound, bounded_seq, concat, epsilon, reference, repeat_exact, Rule,
    SuggestionFn,
};

/// Unbounded upper end for [`GrammarBuilder::seq`].
pub const SEQ_INF: Option<usize> = None;

/// Builder for constructing a [`Grammar`].
///
/// Owns the named registry while rules are being defined. Named rules may be
/// referenced before they are defined; references are resolved when parsing.
///
/// # Example
///
/// ```
/// use parsan::{GrammarBuilder, SEQ_INF, range, reference, terminal};
///
/// let mut builder = GrammarBuilder::new();
/// let word = builder.seq(1, SEQ_INF, range('a', 'z')).unwrap();
/// let list = builder.named(
///     "list",
///     word.clone().or(word.then(terminal(",")).then(reference("list"))),
/// );
/// let grammar = builder.build();
///
/// assert_eq!(grammar.parse_and_sanitize("ab,c", &list), vec!["ab,c"]);
/// ```
#[derive(Default)]
pub struct GrammarBuilder {
    registry: NameRegistry,
    suggestions: HashMap<String, SuggestionFn>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` under `name`, replacing any earlier binding, and
    /// return `rule` itself.
    pub fn named(&mut self, name: &str, rule: Rule) -> Rule {
        self.registry.register(name, rule.clone());
        rule
    }

    /// Register `body` under `name` and return it bound to that name, so
    /// references to `name` inside it resolve without the registry.
    pub(crate) fn named_recursive(&mut self, name: &str, body: Rule) -> Rule {
        self.registry.register(name, body.clone());
        bound(name, body)
    }

    /// Mint a rule name that is not yet bound in this builder.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::NameExhausted`] if every candidate drawn is taken.
    pub fn fresh_name(&self, prefix: &str) -> Result<String, GrammarError> {
        let mut rng = rand::thread_rng();
        self.registry
            .fresh_name_with(prefix, MAX_NAME_ATTEMPTS, || rng.gen())
    }

    /// Between `min` and `max` repetitions of `rule`; `max` of [`SEQ_INF`]
    /// means unbounded. A finite `max` below `min` is raised to `min`.
    ///
    /// The unbounded form is a prefix of `min` copies followed by a fresh
    /// anonymous named rule `tail = "" | rule | rule tail`. The tail is bound
    /// inside the returned rule, so it parses against any grammar.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::NameExhausted`] if no name could be minted for
    /// the unbounded tail.
    pub fn seq(&mut self, min: usize, max: Option<usize>, rule: Rule) -> Result<Rule, GrammarError> {
        if let Some(max) = max {
            return Ok(bounded_seq(min, max, &rule));
        }
        let name = self.fresh_name("seq")?;
        let tail = self.named_recursive(
            &name,
            alternative([
                epsilon(),
                rule.clone(),
                concat([rule.clone(), reference(&name)]),
            ]),
        );
        Ok(concat([repeat_exact(min, &rule), tail]))
    }

    /// Make a suggestion function available to DSL sources loaded afterwards
    /// as `@name`.
    pub fn suggestion(&mut self, name: &str, suggest: SuggestionFn) -> &mut Self {
        self.suggestions.insert(name.to_owned(), suggest);
        self
    }

    pub(crate) fn lookup_suggestion(&self, name: &str) -> Option<SuggestionFn> {
        self.suggestions.get(name).cloned()
    }

    /// Parse DSL text and register every definition it contains.
    ///
    /// # Errors
    ///
    /// Returns [`ParsanError`](crate::ParsanError) on syntax errors, duplicate
    /// definitions or unknown suggestion names.
    pub fn load_dsl(&mut self, input: &str) -> Result<&mut Self, crate::ParsanError> {
        let parsed = crate::parse::parse(input)?;
        crate::compile::compile(self, &parsed)?;
        Ok(self)
    }

    /// Freeze the registry into an immutable [`Grammar`].
    #[must_use]
    pub fn build(self) -> Grammar {
        let grammar = Grammar {
            registry: self.registry,
        };
        debug!(rules = grammar.registry.len(), "grammar built");
        let unresolved = grammar.unresolved_references();
        if !unresolved.is_empty() {
            debug!(?unresolved, "grammar has unbound references");
        }
        grammar
    }
}

impl fmt::Debug for GrammarBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut suggestions: Vec<&str> = self.suggestions.keys().map(String::as_str).collect();
        suggestions.sort_unstable();
        f.debug_struct("GrammarBuilder")
            .field("registry", &self.registry)
            .field("suggestions", &suggestions)
            .finish()
    }
}

/// An immutable set of named rules. Thread-safe and designed to live behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    registry: NameRegistry,
}

impl Grammar {
    /// Repair `input` against `rule`, returning every valid string reachable
    /// by the suggestions embedded in the grammar.
    ///
    /// Results are unique, sorted longest first, then lexicographically.
    /// An empty vector means no match.
    #[must_use]
    pub fn parse_and_sanitize(&self, input: &str, rule: &Rule) -> Vec<String> {
        crate::sanitize::parse_and_sanitize_in(self, input, rule)
    }

    /// Run [`parse_and_sanitize`](Self::parse_and_sanitize) with the rule
    /// registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::UndefinedRule`] if `name` is not registered.
    pub fn sanitize(&self, name: &str, input: &str) -> Result<Vec<String>, GrammarError> {
        let rule = self
            .registry
            .get(name)
            .ok_or_else(|| GrammarError::UndefinedRule {
                name: name.to_owned(),
            })?;
        Ok(self.parse_and_sanitize(input, rule))
    }

    /// The rule registered under `name`.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<Rule> {
        self.registry.get(name).cloned()
    }

    /// The underlying name registry.
    #[must_use]
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Rule> {
        self.registry.get(name)
    }

    /// Registered rule names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Names referenced somewhere in the grammar but never registered.
    /// Such references simply match nothing.
    #[must_use]
    pub fn unresolved_references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        for (_, rule) in self.registry.iter() {
            rule.collect_references(&mut refs);
        }
        refs.retain(|name| !self.registry.contains(name));
        refs.sort_unstable();
        refs.dedup();
        refs
    }

    /// Parse DSL text into a grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ParsanError`](crate::ParsanError) on parse or grammar failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::ParsanError> {
        let mut builder = GrammarBuilder::new();
        builder.load_dsl(input)?;
        Ok(builder.build())
    }

    /// Read a DSL file into a grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ParsanError`](crate::ParsanError) on I/O, parse, or grammar failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::ParsanError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grammar({} rules)", self.registry.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{range, terminal};

    #[test]
    fn named_returns_rule_and_registers_it() {
        let mut builder = GrammarBuilder::new();
        let rule = builder.named("a", terminal("a"));
        assert_eq!(rule.to_string(), r#""a""#);
        let grammar = builder.build();
        assert_eq!(grammar.names(), vec!["a"]);
        assert!(grammar.rule("a").is_some());
        assert!(grammar.registry().contains("a"));
    }

    #[test]
    fn fresh_names_are_unique_and_prefixed() {
        let mut builder = GrammarBuilder::new();
        let first = builder.fresh_name("tail").unwrap();
        builder.named(&first, terminal("a"));
        let second = builder.fresh_name("tail").unwrap();
        assert!(first.starts_with("tail-"));
        assert_ne!(first, second);
    }

    #[test]
    fn unbounded_seq_registers_a_tail() {
        let mut builder = GrammarBuilder::new();
        builder.seq(0, SEQ_INF, terminal("a")).unwrap();
        let grammar = builder.build();
        assert_eq!(grammar.names().len(), 1);
        assert!(grammar.names()[0].starts_with("seq-"));
    }

    #[test]
    fn bounded_seq_registers_nothing() {
        let mut builder = GrammarBuilder::new();
        builder.seq(1, Some(3), range('a', 'z')).unwrap();
        assert!(builder.build().names().is_empty());
    }

    #[test]
    fn sanitize_unknown_rule_is_an_error() {
        let grammar = GrammarBuilder::new().build();
        assert!(matches!(
            grammar.sanitize("nope", "x"),
            Err(GrammarError::UndefinedRule { name }) if name == "nope"
        ));
    }

    #[test]
    fn unresolved_references_are_reported() {
        let mut builder = GrammarBuilder::new();
        builder.named("a", reference("b").or(reference("c")));
        builder.named("c", terminal("c"));
        let grammar = builder.build();
        assert_eq!(grammar.unresolved_references(), vec!["b"]);
    }

    #[test]
    fn display_counts_rules() {
        let mut builder = GrammarBuilder::new();
        builder.named("a", terminal("a"));
        builder.named("b", terminal("b"));
        assert_eq!(builder.build().to_string(), "Grammar(2 rules)");
    }
}
