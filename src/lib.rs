//! Parse-and-sanitize grammar engine.
//!
//! A grammar is built from combinators (terminals, character ranges,
//! sequences, alternatives, named rules and repetition). Ranges and
//! alternatives can carry a suggestion function that proposes character
//! rewrites when direct matching fails. [`Grammar::parse_and_sanitize`]
//! returns every string the grammar accepts that is reachable from the input
//! through those rewrites, longest first.
//!
//! ```
//! use parsan::rfc1035_grammar;
//!
//! let (grammar, subdomain) = rfc1035_grammar().unwrap();
//! assert_eq!(
//!     grammar.parse_and_sanitize("foo@bar", &subdomain),
//!     vec!["foo-at-bar", "foo-bar"],
//! );
//! ```

mod charclass;
mod compile;
mod error;
pub mod parse;
mod rfc1035;
mod sanitize;
mod suggest;
mod types;
mod validate;

pub use charclass::{
    digit, ldh_str, let_dig, let_dig_hyp, letter, lower_ldh_str, lower_let_dig,
    lower_let_dig_hyp, lower_letter,
};
pub use error::ParsanError;
pub use rfc1035::{
    rfc1035_grammar, rfc1035_label, rfc1035_subdomain, rfc1035_subdomain_suggestion,
    RFC1035_MAX_LENGTH, RFC1035_SUBDOMAIN,
};
pub use sanitize::parse_and_sanitize;
pub use suggest::{
    merge_suggestion_funcs, prepend_or_replace_first_rune_with_strings,
    replace_first_rune_with_strings, suggest_const_rune, suggest_const_rune_unless,
    suggest_const_strings_if, suggest_lower_letter, unless_suggestion_func,
};
pub use types::{
    alternative, concat, epsilon, opt, range, reference, terminal, Grammar, GrammarBuilder,
    GrammarError, NameRegistry, ParseContext, ParseResult, Rule, SuggestionFn, SEQ_INF,
};
