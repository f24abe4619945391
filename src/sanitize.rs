use tracing::debug;

use crate::validate::validate;
use crate::{Grammar, ParseContext, Rule};

/// Repair `input` against `rule` with no named rules available.
///
/// Rules produced by [`GrammarBuilder::seq`](crate::GrammarBuilder::seq), the
/// character-class runs and the RFC 1035 rules carry their own recursion and
/// work here. A hand-written [`reference`](crate::reference) only resolves
/// through [`Grammar::parse_and_sanitize`].
///
/// ```
/// use parsan::{parse_and_sanitize, range, suggest_const_rune};
///
/// let lower = range('a', 'z').with_suggestion(suggest_const_rune('a')).unwrap();
/// assert_eq!(parse_and_sanitize("A", &lower), vec!["a"]);
/// ```
#[must_use]
pub fn parse_and_sanitize(input: &str, rule: &Rule) -> Vec<String> {
    let grammar = Grammar::default();
    grammar.parse_and_sanitize(input, rule)
}

pub(crate) fn parse_and_sanitize_in(grammar: &Grammar, input: &str, rule: &Rule) -> Vec<String> {
    let max_len = rule.declared_max_length();
    let input = match max_len {
        Some(max) if input.len() > max => {
            let cut = floor_char_boundary(input, max);
            debug!(from = input.len(), to = cut, "input truncated to length ceiling");
            &input[..cut]
        }
        _ => input,
    };

    let ctx = ParseContext::new(grammar);
    let mut out: Vec<String> = validate(rule, &ctx, input)
        .into_iter()
        .filter(|r| r.is_complete())
        .map(|r| r.sanitized)
        .filter(|s| max_len.map_or(true, |max| s.len() <= max))
        .collect();

    out.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    out.dedup();
    debug!(input_len = input.len(), results = out.len(), "sanitized");
    out
}

/// Largest index `<= max` that falls on a character boundary of `s`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut cut = max.min(s.len());
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alternative, concat, terminal, GrammarBuilder, SEQ_INF};

    #[test]
    fn single_terminal() {
        assert_eq!(parse_and_sanitize("a", &terminal("a")), vec!["a"]);
    }

    #[test]
    fn leftover_input_is_rejected() {
        assert!(parse_and_sanitize("aa", &terminal("a")).is_empty());
    }

    #[test]
    fn results_sorted_longest_first_then_lexicographic() {
        let r = alternative([terminal("b"), terminal("ab"), terminal("a"), terminal("c")])
            .with_suggestion(crate::suggest::replace_first_rune_with_strings(["zz", "b", "a", "yy"]))
            .unwrap();
        // "x" matches nothing directly, so every replacement is offered.
        assert_eq!(parse_and_sanitize("x", &r), vec!["yy", "zz", "a", "b"]);
    }

    #[test]
    fn duplicates_are_removed() {
        let r = alternative([terminal("a"), terminal("a"), concat([terminal("a")])]);
        assert_eq!(parse_and_sanitize("a", &r), vec!["a"]);
    }

    #[test]
    fn input_truncated_to_ceiling() {
        let mut builder = GrammarBuilder::new();
        let many = builder.seq(1, SEQ_INF, terminal("a")).unwrap().max_length(3);
        let grammar = builder.build();
        assert_eq!(grammar.parse_and_sanitize("aaaaaa", &many), vec!["aaa"]);
    }

    #[test]
    fn results_longer_than_ceiling_are_dropped() {
        let r = alternative([terminal("a")])
            .with_suggestion(crate::suggest::replace_first_rune_with_strings(["long", "ok"]))
            .unwrap()
            .max_length(2);
        assert_eq!(parse_and_sanitize("x", &r), vec!["ok"]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(floor_char_boundary("aé", 2), 1);
        assert_eq!(floor_char_boundary("aé", 3), 3);
        assert_eq!(floor_char_boundary("abc", 10), 3);
    }

    #[test]
    fn builder_repetition_runs_without_its_grammar() {
        let mut builder = GrammarBuilder::new();
        let many = builder.seq(1, SEQ_INF, terminal("a")).unwrap();
        assert_eq!(parse_and_sanitize("aaa", &many), vec!["aaa"]);
        assert!(parse_and_sanitize("", &many).is_empty());
    }

    #[test]
    fn nested_ceiling_is_ignored() {
        let r = concat([terminal("abc").max_length(1), terminal("d")]);
        assert_eq!(parse_and_sanitize("abcd", &r), vec!["abcd"]);
    }
}
