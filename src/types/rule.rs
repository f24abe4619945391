use std::fmt;
use std::sync::Arc;

use super::context::ParseContext;
use super::error::GrammarError;
use super::result::ParseResult;

/// A character-level rewrite strategy consulted when direct matching fails.
///
/// Receives the unconsumed input and returns zero or more alternative
/// results. Implementations must never return a `to_parse` longer than the
/// input they were given.
pub type SuggestionFn = Arc<dyn Fn(&str) -> Vec<ParseResult> + Send + Sync>;

/// A node of the grammar. Cheap to clone: clones share the underlying tree.
///
/// Build rules with the free constructors ([`terminal`], [`range`],
/// [`concat`], [`alternative`], [`reference`], [`opt`]) and with
/// [`GrammarBuilder`](super::GrammarBuilder) for anything that needs the
/// named registry.
#[derive(Clone)]
pub struct Rule {
    kind: Arc<RuleKind>,
}

pub(crate) enum RuleKind {
    Terminal(String),
    Range {
        low: char,
        high: char,
        suggest: Option<SuggestionFn>,
    },
    Concat(Vec<Rule>),
    Alternative {
        branches: Vec<Rule>,
        suggest: Option<SuggestionFn>,
    },
    Ref(String),
    /// `body` with `name` bound to `body` itself for references inside it,
    /// so the recursion does not depend on any registry.
    Bound {
        name: String,
        body: Rule,
    },
    LengthConstrained {
        inner: Rule,
        max: usize,
    },
}

impl Rule {
    fn from_kind(kind: RuleKind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    pub(crate) fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Every way this rule matches a prefix of `input`, in enumeration order.
    /// Duplicates are kept; see [`Grammar::parse_and_sanitize`](super::Grammar::parse_and_sanitize)
    /// for the filtered, sorted view.
    #[must_use]
    pub fn validate(&self, ctx: &ParseContext<'_>, input: &str) -> Vec<ParseResult> {
        crate::validate::validate(self, ctx, input)
    }

    /// Attach a suggestion function, consulted only when direct matching fails.
    ///
    /// A length-constrained rule forwards the attachment to the rule it wraps
    /// and keeps its ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::SuggestionUnsupported`] for terminals,
    /// concatenations and references, including the self-bound rules made
    /// by [`GrammarBuilder::seq`](super::GrammarBuilder::seq).
    pub fn with_suggestion(self, suggest: SuggestionFn) -> Result<Rule, GrammarError> {
        match self.kind() {
            RuleKind::Range { low, high, .. } => Ok(range_with(*low, *high, Some(suggest))),
            RuleKind::Alternative { branches, .. } => {
                Ok(alternative_with(branches.iter().cloned(), Some(suggest)))
            }
            RuleKind::LengthConstrained { inner, max } => {
                let max = *max;
                Ok(inner.clone().with_suggestion(suggest)?.max_length(max))
            }
            RuleKind::Terminal(_)
            | RuleKind::Concat(_)
            | RuleKind::Ref(_)
            | RuleKind::Bound { .. } => {
                Err(GrammarError::SuggestionUnsupported {
                    kind: self.kind_name(),
                })
            }
        }
    }

    /// Wrap this rule with a maximum length. Matching is unchanged; the
    /// ceiling is only honored when this is the top-level rule handed to the
    /// driver.
    #[must_use]
    pub fn max_length(self, max: usize) -> Rule {
        Rule::from_kind(RuleKind::LengthConstrained { inner: self, max })
    }

    /// The length ceiling declared by this rule itself, if any. Nested
    /// ceilings are not reported.
    #[must_use]
    pub fn declared_max_length(&self) -> Option<usize> {
        match self.kind() {
            RuleKind::LengthConstrained { max, .. } => Some(*max),
            _ => None,
        }
    }

    /// Concatenate `self` and `other`.
    #[must_use]
    pub fn then(self, other: Rule) -> Rule {
        concat([self, other])
    }

    /// Alternative between `self` and `other`, tried in that order.
    #[must_use]
    pub fn or(self, other: Rule) -> Rule {
        alternative([self, other])
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self.kind() {
            RuleKind::Terminal(_) => "terminal",
            RuleKind::Range { .. } => "range",
            RuleKind::Concat(_) => "concat",
            RuleKind::Alternative { .. } => "alternative",
            RuleKind::Ref(_) | RuleKind::Bound { .. } => "reference",
            RuleKind::LengthConstrained { .. } => "length-constrained",
        }
    }

    /// Names of every rule referenced from this rule's tree.
    pub(crate) fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self.kind() {
            RuleKind::Ref(name) => out.push(name),
            RuleKind::Concat(parts) | RuleKind::Alternative { branches: parts, .. } => {
                for part in parts {
                    part.collect_references(out);
                }
            }
            RuleKind::Bound { name, body } => {
                let mut inner = Vec::new();
                body.collect_references(&mut inner);
                out.extend(inner.into_iter().filter(|r| *r != name.as_str()));
            }
            RuleKind::LengthConstrained { inner, .. } => inner.collect_references(out),
            RuleKind::Terminal(_) | RuleKind::Range { .. } => {}
        }
    }
}

/// Matches `text` literally.
#[must_use]
pub fn terminal(text: &str) -> Rule {
    Rule::from_kind(RuleKind::Terminal(text.to_owned()))
}

/// Matches one character in `low..=high`. A `high` below `low` is raised to `low`.
#[must_use]
pub fn range(low: char, high: char) -> Rule {
    range_with(low, high, None)
}

/// Matches the given rules in sequence. No rules matches the empty string;
/// a single rule is returned unchanged.
#[must_use]
pub fn concat(rules: impl IntoIterator<Item = Rule>) -> Rule {
    let mut rules: Vec<Rule> = rules.into_iter().collect();
    if rules.len() == 1 {
        if let Some(only) = rules.pop() {
            return only;
        }
    }
    Rule::from_kind(RuleKind::Concat(rules))
}

/// Matches any of the given rules; results follow branch order.
#[must_use]
pub fn alternative(rules: impl IntoIterator<Item = Rule>) -> Rule {
    alternative_with(rules, None)
}

/// A range with an optional suggestion attached.
pub(crate) fn range_with(low: char, high: char, suggest: Option<SuggestionFn>) -> Rule {
    Rule::from_kind(RuleKind::Range {
        low,
        high: high.max(low),
        suggest,
    })
}

/// An alternative with an optional suggestion attached.
pub(crate) fn alternative_with(
    rules: impl IntoIterator<Item = Rule>,
    suggest: Option<SuggestionFn>,
) -> Rule {
    Rule::from_kind(RuleKind::Alternative {
        branches: rules.into_iter().collect(),
        suggest,
    })
}

/// Refers to a named rule, resolved when parsing.
#[must_use]
pub fn reference(name: &str) -> Rule {
    Rule::from_kind(RuleKind::Ref(name.to_owned()))
}

/// `body` under `name`, with references to `name` inside it resolving to
/// `body` before the grammar is consulted.
pub(crate) fn bound(name: &str, body: Rule) -> Rule {
    Rule::from_kind(RuleKind::Bound {
        name: name.to_owned(),
        body,
    })
}

/// The empty match.
#[must_use]
pub fn epsilon() -> Rule {
    Rule::from_kind(RuleKind::Concat(Vec::new()))
}

/// Zero or one `rule`.
#[must_use]
pub fn opt(rule: Rule) -> Rule {
    bounded_seq(0, 1, &rule)
}

/// Exactly `n` copies of `rule` in sequence.
pub(crate) fn repeat_exact(n: usize, rule: &Rule) -> Rule {
    concat(std::iter::repeat(rule).take(n).cloned())
}

/// Between `min` and `max` copies, enumerated shortest first.
pub(crate) fn bounded_seq(min: usize, max: usize, rule: &Rule) -> Rule {
    let max = max.max(min);
    if min == max {
        return repeat_exact(min, rule);
    }
    alternative((min..=max).map(|n| repeat_exact(n, rule)))
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

fn write_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    f.write_str("'")?;
    write_escaped(f, c.encode_utf8(&mut [0; 4]), '\'')?;
    f.write_str("'")
}

/// DSL-like notation for diagnostics. Suggestion functions print as `@<fn>`
/// and inline-bound rules as `name: body`, neither of which the DSL accepts,
/// so the output does not load back as a grammar.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            RuleKind::Terminal(text) => {
                f.write_str("\"")?;
                write_escaped(f, text, '"')?;
                f.write_str("\"")
            }
            RuleKind::Range { low, high, suggest } => {
                write_char(f, *low)?;
                if low != high {
                    f.write_str("..")?;
                    write_char(f, *high)?;
                }
                if suggest.is_some() {
                    f.write_str("@<fn>")?;
                }
                Ok(())
            }
            RuleKind::Concat(parts) if parts.is_empty() => f.write_str("\"\""),
            RuleKind::Concat(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
            RuleKind::Alternative { branches, suggest } => {
                f.write_str("(")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{branch}")?;
                }
                f.write_str(")")?;
                if suggest.is_some() {
                    f.write_str("@<fn>")?;
                }
                Ok(())
            }
            RuleKind::Ref(name) => f.write_str(name),
            RuleKind::Bound { name, body } => write!(f, "{name}: {body}"),
            RuleKind::LengthConstrained { inner, max } => write!(f, "{inner} (max {max})"),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&format_args!("{self}")).finish()
    }
}
