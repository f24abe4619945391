//! Labels and subdomains as defined by RFC 1035 section 2.3.1, with the
//! repairs used to turn arbitrary identifiers into valid DNS names.
//!
//! ```text
//! <subdomain> ::= <label> | <subdomain> "." <label>
//! <label>     ::= <letter> [ [ <ldh-str> ] <let-dig> ]
//! ```

use crate::charclass::{ldh_str, let_dig, letter};
use crate::suggest::{
    merge_suggestion_funcs, prepend_or_replace_first_rune_with_strings,
    replace_first_rune_with_strings, suggest_const_rune_unless, suggest_const_strings_if,
};
use crate::{alternative, concat, opt, reference, terminal};
use crate::{Grammar, GrammarBuilder, GrammarError, Rule, SuggestionFn};

/// Name the subdomain rule is registered under.
pub const RFC1035_SUBDOMAIN: &str = "rfc1035-subdomain";

/// Longest subdomain accepted, in bytes.
pub const RFC1035_MAX_LENGTH: usize = 63;

/// A label whose interior characters are repaired with `suggest`.
///
/// A bad first character is replaced by, or prefixed with, `x`; a bad last
/// character is replaced by `x`.
///
/// # Errors
///
/// Returns [`GrammarError::NameExhausted`] if the interior run could not be named.
pub fn rfc1035_label(
    builder: &mut GrammarBuilder,
    suggest: Option<SuggestionFn>,
) -> Result<Rule, GrammarError> {
    let first = letter(Some(prepend_or_replace_first_rune_with_strings(["x"])));
    let interior = opt(ldh_str(builder, suggest)?);
    let last = let_dig(Some(replace_first_rune_with_strings(["x"])));
    Ok(concat([first, opt(concat([interior, last]))]))
}

/// Repairs inside a subdomain label: `@` becomes `-at-` or `-`, and any other
/// character except `.` becomes `-`.
#[must_use]
pub fn rfc1035_subdomain_suggestion() -> SuggestionFn {
    merge_suggestion_funcs([
        suggest_const_strings_if(["-at-", "-"], '@'),
        suggest_const_rune_unless('-', '.'),
    ])
}

/// The subdomain rule, registered as [`RFC1035_SUBDOMAIN`] and capped at
/// [`RFC1035_MAX_LENGTH`]. The returned rule carries its own recursion, so it
/// also works with the free [`parse_and_sanitize`](crate::parse_and_sanitize).
///
/// # Errors
///
/// Returns [`GrammarError::NameExhausted`] if the label's interior run could
/// not be named.
pub fn rfc1035_subdomain(builder: &mut GrammarBuilder) -> Result<Rule, GrammarError> {
    let label = rfc1035_label(builder, Some(rfc1035_subdomain_suggestion()))?;
    let subdomain = builder.named_recursive(
        RFC1035_SUBDOMAIN,
        alternative([
            label.clone(),
            concat([label, terminal("."), reference(RFC1035_SUBDOMAIN)]),
        ]),
    );
    Ok(subdomain.max_length(RFC1035_MAX_LENGTH))
}

/// A ready-made grammar holding the subdomain rule, and the rule itself.
///
/// # Errors
///
/// Returns [`GrammarError::NameExhausted`] if a fresh rule name could not be minted.
pub fn rfc1035_grammar() -> Result<(Grammar, Rule), GrammarError> {
    let mut builder = GrammarBuilder::new();
    let subdomain = rfc1035_subdomain(&mut builder)?;
    Ok((builder.build(), subdomain))
}
