//! Character classes used by identifier grammars. Each takes an optional
//! suggestion consulted when the class fails to match.

use crate::types::{alternative_with, range_with};
use crate::{reference, terminal, GrammarBuilder, GrammarError, Rule, SuggestionFn};

/// `'0'..'9'`
#[must_use]
pub fn digit(suggest: Option<SuggestionFn>) -> Rule {
    range_with('0', '9', suggest)
}

/// `'a'..'z' | 'A'..'Z'`
#[must_use]
pub fn letter(suggest: Option<SuggestionFn>) -> Rule {
    alternative_with([range_with('a', 'z', None), range_with('A', 'Z', None)], suggest)
}

/// `'a'..'z'`
#[must_use]
pub fn lower_letter(suggest: Option<SuggestionFn>) -> Rule {
    range_with('a', 'z', suggest)
}

/// A letter or a digit.
#[must_use]
pub fn let_dig(suggest: Option<SuggestionFn>) -> Rule {
    alternative_with([letter(None), digit(None)], suggest)
}

/// A lowercase letter or a digit.
#[must_use]
pub fn lower_let_dig(suggest: Option<SuggestionFn>) -> Rule {
    alternative_with([lower_letter(None), digit(None)], suggest)
}

/// A letter, a digit or a hyphen.
#[must_use]
pub fn let_dig_hyp(suggest: Option<SuggestionFn>) -> Rule {
    alternative_with([letter(None), digit(None), terminal("-")], suggest)
}

/// A lowercase letter, a digit or a hyphen.
#[must_use]
pub fn lower_let_dig_hyp(suggest: Option<SuggestionFn>) -> Rule {
    alternative_with([lower_letter(None), digit(None), terminal("-")], suggest)
}

/// One or more [`let_dig_hyp`], as the recursive rule `x = ldh | ldh x`
/// registered under a fresh name and bound inside the returned rule.
///
/// # Errors
///
/// Returns [`GrammarError::NameExhausted`] if no name could be minted.
pub fn ldh_str(
    builder: &mut GrammarBuilder,
    suggest: Option<SuggestionFn>,
) -> Result<Rule, GrammarError> {
    recursive_plus(builder, "ldh-str", let_dig_hyp(suggest))
}

/// One or more [`lower_let_dig_hyp`].
///
/// # Errors
///
/// Returns [`GrammarError::NameExhausted`] if no name could be minted.
pub fn lower_ldh_str(
    builder: &mut GrammarBuilder,
    suggest: Option<SuggestionFn>,
) -> Result<Rule, GrammarError> {
    recursive_plus(builder, "lower-ldh-str", lower_let_dig_hyp(suggest))
}

fn recursive_plus(
    builder: &mut GrammarBuilder,
    prefix: &str,
    item: Rule,
) -> Result<Rule, GrammarError> {
    let name = builder.fresh_name(prefix)?;
    let rule = item.clone().or(item.then(reference(&name)));
    Ok(builder.named_recursive(&name, rule))
}
