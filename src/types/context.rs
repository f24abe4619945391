use super::grammar::Grammar;
use super::rule::Rule;

/// The named-rule call stack of one descent, used as the cycle guard.
///
/// Each frame records a rule name and the exact input it was entered with.
/// Frames are linked to their parent on the caller's stack, so entering a
/// named rule never disturbs the view of sibling branches. The stack also
/// carries rules bound inline by self-referencing rules, which take
/// precedence over the grammar when a reference is resolved.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    grammar: &'a Grammar,
    link: Link<'a>,
    parent: Option<&'a ParseContext<'a>>,
}

#[derive(Debug, Clone, Copy)]
enum Link<'a> {
    Root,
    Frame { name: &'a str, input: &'a str },
    Binding { name: &'a str, rule: &'a Rule },
}

impl<'a> ParseContext<'a> {
    /// A fresh context with no frames.
    #[must_use]
    pub fn new(grammar: &'a Grammar) -> Self {
        Self {
            grammar,
            link: Link::Root,
            parent: None,
        }
    }

    /// The grammar references are resolved against.
    #[must_use]
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Push `(name, input)` on a child context.
    ///
    /// Returns `None` if that exact frame is already on the stack.
    #[must_use]
    pub fn enter<'b>(&'b self, name: &'b str, input: &'b str) -> Option<ParseContext<'b>> {
        if self.contains(name, input) {
            return None;
        }
        Some(self.child(Link::Frame { name, input }))
    }

    /// A child context in which `name` resolves to `rule`.
    pub(crate) fn bind<'b>(&'b self, name: &'b str, rule: &'b Rule) -> ParseContext<'b> {
        self.child(Link::Binding { name, rule })
    }

    /// The rule `name` refers to: the innermost inline binding, else the grammar.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Rule> {
        self.links()
            .find_map(|link| match link {
                Link::Binding { name: bound, rule } if bound == name => Some(rule),
                _ => None,
            })
            .or_else(|| self.grammar.lookup(name))
    }

    /// Whether `(name, input)` is on the stack.
    #[must_use]
    pub fn contains(&self, name: &str, input: &str) -> bool {
        self.links().any(|link| {
            matches!(link, Link::Frame { name: n, input: i } if n == name && i == input)
        })
    }

    /// Number of frames on the stack. Inline bindings are not counted.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.links()
            .filter(|link| matches!(link, Link::Frame { .. }))
            .count()
    }

    fn child<'b>(&'b self, link: Link<'b>) -> ParseContext<'b> {
        ParseContext {
            grammar: self.grammar,
            link,
            parent: Some(self),
        }
    }

    fn links(&self) -> impl Iterator<Item = Link<'_>> + '_ {
        let mut cursor = Some(self);
        std::iter::from_fn(move || {
            let ctx = cursor?;
            cursor = ctx.parent;
            Some(ctx.link)
        })
    }
}
