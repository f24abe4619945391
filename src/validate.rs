use tracing::trace;

use crate::types::RuleKind;
use crate::{ParseContext, ParseResult, Rule, SuggestionFn};

/// Every way `rule` can match a prefix of `input`, in left-to-right
/// enumeration order. Duplicates are kept.
pub(crate) fn validate(rule: &Rule, ctx: &ParseContext<'_>, input: &str) -> Vec<ParseResult> {
    match rule.kind() {
        RuleKind::Terminal(text) => match input.strip_prefix(text.as_str()) {
            Some(rest) => vec![ParseResult::new(text.as_str(), rest)],
            None => Vec::new(),
        },
        RuleKind::Range { low, high, suggest } => {
            match input.chars().next() {
                Some(c) if (*low..=*high).contains(&c) => {
                    return vec![ParseResult::new(c, &input[c.len_utf8()..])];
                }
                _ => {}
            }
            suggestions(suggest.as_ref(), input)
        }
        RuleKind::Concat(parts) => validate_concat(parts, ctx, input),
        RuleKind::Alternative { branches, suggest } => {
            let results: Vec<ParseResult> = branches
                .iter()
                .flat_map(|branch| validate(branch, ctx, input))
                .collect();
            if results.is_empty() {
                suggestions(suggest.as_ref(), input)
            } else {
                results
            }
        }
        RuleKind::Ref(name) => {
            let Some(target) = ctx.resolve(name) else {
                trace!(rule = %name, "reference to unbound rule");
                return Vec::new();
            };
            let Some(child) = ctx.enter(name, input) else {
                trace!(rule = %name, remaining = input.len(), "cycle guard tripped");
                return Vec::new();
            };
            validate(target, &child, input)
        }
        RuleKind::Bound { name, body } => validate(body, &ctx.bind(name, body), input),
        RuleKind::LengthConstrained { inner, .. } => validate(inner, ctx, input),
    }
}

/// Right-associative pairing: each result of the head feeds its remainder to
/// the rest of the sequence.
fn validate_concat(parts: &[Rule], ctx: &ParseContext<'_>, input: &str) -> Vec<ParseResult> {
    match parts {
        [] => vec![ParseResult::new("", input)],
        [only] => validate(only, ctx, input),
        [first, rest @ ..] => {
            let mut out = Vec::new();
            for head in validate(first, ctx, input) {
                for tail in validate_concat(rest, ctx, &head.to_parse) {
                    out.push(tail.prefixed(&head.sanitized));
                }
            }
            out
        }
    }
}

fn suggestions(suggest: Option<&SuggestionFn>, input: &str) -> Vec<ParseResult> {
    match suggest {
        Some(f) => {
            let results = f(input);
            debug_assert!(
                results.iter().all(|r| r.to_parse.len() <= input.len()),
                "suggestion grew the remaining input"
            );
            results
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{alternative, concat, epsilon, range, reference, terminal, Grammar, GrammarBuilder};

    fn run(grammar: &Grammar, rule: &Rule, input: &str) -> Vec<(String, String)> {
        let ctx = ParseContext::new(grammar);
        validate(rule, &ctx, input)
            .into_iter()
            .map(|r| (r.sanitized, r.to_parse))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
            .collect()
    }

    #[test]
    fn terminal_matches_prefix() {
        let g = Grammar::default();
        assert_eq!(run(&g, &terminal("ab"), "abc"), pairs(&[("ab", "c")]));
        assert!(run(&g, &terminal("ab"), "ba").is_empty());
    }

    #[test]
    fn empty_terminal_matches_everything() {
        let g = Grammar::default();
        assert_eq!(run(&g, &terminal(""), "x"), pairs(&[("", "x")]));
    }

    #[test]
    fn range_matches_first_codepoint() {
        let g = Grammar::default();
        assert_eq!(run(&g, &range('a', 'c'), "bz"), pairs(&[("b", "z")]));
        assert!(run(&g, &range('a', 'c'), "dz").is_empty());
        assert!(run(&g, &range('a', 'c'), "").is_empty());
    }

    #[test]
    fn range_handles_multibyte() {
        let g = Grammar::default();
        assert_eq!(run(&g, &range('à', 'ÿ'), "éa"), pairs(&[("é", "a")]));
    }

    #[test]
    fn range_consults_suggestion_only_on_failure() {
        let g = Grammar::default();
        let r = range('a', 'z')
            .with_suggestion(Arc::new(|input: &str| {
                vec![ParseResult::new("?", input.get(1..).unwrap_or(""))]
            }))
            .unwrap();
        assert_eq!(run(&g, &r, "b"), pairs(&[("b", "")]));
        assert_eq!(run(&g, &r, "B"), pairs(&[("?", "")]));
    }

    #[test]
    fn empty_concat_yields_input() {
        let g = Grammar::default();
        assert_eq!(run(&g, &epsilon(), "xy"), pairs(&[("", "xy")]));
    }

    #[test]
    fn concat_feeds_tails_forward() {
        let g = Grammar::default();
        let r = concat([terminal("a"), alternative([terminal("b"), terminal("bc")]), terminal("c")]);
        assert_eq!(run(&g, &r, "abcc"), pairs(&[("abc", "c"), ("abcc", "")]));
    }

    #[test]
    fn alternative_preserves_branch_order() {
        let g = Grammar::default();
        let r = alternative([terminal("ab"), terminal("a"), epsilon()]);
        assert_eq!(
            run(&g, &r, "ab"),
            pairs(&[("ab", ""), ("a", "b"), ("", "ab")])
        );
    }

    #[test]
    fn alternative_suggestion_skipped_when_a_branch_matches() {
        let g = Grammar::default();
        let r = alternative([terminal("a")])
            .with_suggestion(Arc::new(|input: &str| vec![ParseResult::new("!", input)]))
            .unwrap();
        assert_eq!(run(&g, &r, "a"), pairs(&[("a", "")]));
        assert_eq!(run(&g, &r, "b"), pairs(&[("!", "b")]));
    }

    #[test]
    fn unbound_reference_matches_nothing() {
        let g = Grammar::default();
        assert!(run(&g, &reference("missing"), "a").is_empty());
    }

    #[test]
    fn left_recursion_terminates() {
        let mut builder = GrammarBuilder::new();
        let expr = builder.named(
            "expr",
            alternative([concat([reference("expr"), terminal("+"), terminal("1")]), terminal("1")]),
        );
        let g = builder.build();
        let results = run(&g, &expr, "1+1");
        assert!(results.contains(&("1".to_owned(), "+1".to_owned())));
    }

    #[test]
    fn bound_rule_recurses_without_a_grammar() {
        let g = Grammar::default();
        let item = range('a', 'b');
        let body = alternative([item.clone(), concat([item, reference("run")])]);
        let run_rule = crate::types::bound("run", body);
        let results = run(&g, &run_rule, "abz");
        assert_eq!(results, pairs(&[("a", "bz"), ("ab", "z")]));
    }

    #[test]
    fn bound_rule_shadows_the_grammar() {
        let mut builder = GrammarBuilder::new();
        builder.named("run", terminal("never"));
        let g = builder.build();
        let r = crate::types::bound(
            "run",
            alternative([terminal("x"), concat([terminal("x"), reference("run")])]),
        );
        assert_eq!(run(&g, &r, "xx"), pairs(&[("x", "x"), ("xx", "")]));
    }

    #[test]
    fn length_constraint_does_not_change_matching() {
        let g = Grammar::default();
        let r = terminal("abc").max_length(1);
        assert_eq!(run(&g, &r, "abc"), pairs(&[("abc", "")]));
    }
}
