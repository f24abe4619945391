//! Suggestion functions: character-level rewrites offered when a range or
//! alternative fails to match directly.
//!
//! Every suggestion is fed back into the enclosing rule exactly like a direct
//! match, so a rewrite only survives if the rest of the grammar accepts what
//! follows it.

use std::sync::Arc;

use crate::{ParseResult, SuggestionFn};

/// The input with its first character removed, or `None` for empty input.
fn split_first_rune(input: &str) -> Option<(char, &str)> {
    let mut chars = input.chars();
    let first = chars.next()?;
    Some((first, chars.as_str()))
}

fn owned(strings: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    strings.into_iter().map(Into::into).collect()
}

/// Replace the first character with each of `strings`. Empty input yields nothing.
pub fn replace_first_rune_with_strings(
    strings: impl IntoIterator<Item = impl Into<String>>,
) -> SuggestionFn {
    let strings = owned(strings);
    Arc::new(move |input: &str| -> Vec<ParseResult> {
        match split_first_rune(input) {
            Some((_, rest)) => strings.iter().map(|s| ParseResult::new(s.as_str(), rest)).collect(),
            None => Vec::new(),
        }
    })
}

/// For each of `strings`, offer it inserted before the input and, when the
/// input is non-empty, offer it in place of the first character.
pub fn prepend_or_replace_first_rune_with_strings(
    strings: impl IntoIterator<Item = impl Into<String>>,
) -> SuggestionFn {
    let strings = owned(strings);
    Arc::new(move |input: &str| {
        let rest = split_first_rune(input).map(|(_, rest)| rest);
        let mut out = Vec::with_capacity(strings.len() * 2);
        for s in &strings {
            out.push(ParseResult::new(s.as_str(), input));
            if let Some(rest) = rest {
                out.push(ParseResult::new(s.as_str(), rest));
            }
        }
        out
    })
}

/// Replace the first character with `rune`.
#[must_use]
pub fn suggest_const_rune(rune: char) -> SuggestionFn {
    replace_first_rune_with_strings([rune])
}

/// Concatenate the suggestions of every function, in order.
pub fn merge_suggestion_funcs(funcs: impl IntoIterator<Item = SuggestionFn>) -> SuggestionFn {
    let funcs: Vec<SuggestionFn> = funcs.into_iter().collect();
    Arc::new(move |input: &str| -> Vec<ParseResult> {
        funcs.iter().flat_map(|f| f(input)).collect()
    })
}

/// Replace the first character with `rune` unless that character is `except`.
#[must_use]
pub fn suggest_const_rune_unless(rune: char, except: char) -> SuggestionFn {
    Arc::new(move |input: &str| match split_first_rune(input) {
        Some((first, rest)) if first != except => vec![ParseResult::new(rune, rest)],
        _ => Vec::new(),
    })
}

/// Replace the first character with each of `strings`, but only when that
/// character is `when`.
pub fn suggest_const_strings_if(
    strings: impl IntoIterator<Item = impl Into<String>>,
    when: char,
) -> SuggestionFn {
    let strings = owned(strings);
    Arc::new(move |input: &str| -> Vec<ParseResult> {
        match split_first_rune(input) {
            Some((first, rest)) if first == when => {
                strings.iter().map(|s| ParseResult::new(s.as_str(), rest)).collect()
            }
            _ => Vec::new(),
        }
    })
}

/// Lowercase an ASCII letter in first position; other characters get no suggestion.
#[must_use]
pub fn suggest_lower_letter() -> SuggestionFn {
    Arc::new(|input: &str| match split_first_rune(input) {
        Some((first, rest)) if first.is_ascii_alphabetic() => {
            vec![ParseResult::new(first.to_ascii_lowercase(), rest)]
        }
        _ => Vec::new(),
    })
}

/// `primary`'s suggestions when it has any, otherwise `fallback`'s.
#[must_use]
pub fn unless_suggestion_func(primary: SuggestionFn, fallback: SuggestionFn) -> SuggestionFn {
    Arc::new(move |input: &str| {
        let first = primary(input);
        if first.is_empty() {
            fallback(input)
        } else {
            first
        }
    })
}
