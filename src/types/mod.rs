mod context;
mod error;
mod grammar;
mod registry;
mod result;
mod rule;

pub use context::ParseContext;
pub use error::GrammarError;
pub use grammar::{Grammar, GrammarBuilder, SEQ_INF};
pub use registry::NameRegistry;
pub use result::ParseResult;
pub use rule::{
    alternative, concat, epsilon, opt, range, reference, terminal, Rule, SuggestionFn,
};

pub(crate) use rule::{alternative_with, bound, range_with, RuleKind};
