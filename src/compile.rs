use std::collections::HashSet;

use tracing::debug;

use crate::parse::{Definition, Node, ParsedGrammar};
use crate::{alternative, concat, range, reference, terminal};
use crate::{GrammarBuilder, GrammarError, Rule};

/// Lower parsed DSL definitions into rules and register each under its name.
pub(crate) fn compile(
    builder: &mut GrammarBuilder,
    parsed: &ParsedGrammar,
) -> Result<(), GrammarError> {
    check_duplicates(&parsed.definitions)?;

    for def in &parsed.definitions {
        let rule = lower(builder, &def.body, &def.name)?;
        let rule = match def.max_length {
            Some(max) => rule.max_length(max),
            None => rule,
        };
        builder.named(&def.name, rule);
    }

    debug!(definitions = parsed.definitions.len(), "loaded grammar source");
    Ok(())
}

fn check_duplicates(definitions: &[Definition]) -> Result<(), GrammarError> {
    let mut seen = HashSet::new();
    for def in definitions {
        if !seen.insert(def.name.as_str()) {
            return Err(GrammarError::DuplicateRule {
                name: def.name.clone(),
            });
        }
    }
    Ok(())
}

fn lower(builder: &mut GrammarBuilder, node: &Node, rule_name: &str) -> Result<Rule, GrammarError> {
    match node {
        Node::Literal(text) => Ok(terminal(text)),
        Node::Range(low, high) => Ok(range(*low, *high)),
        Node::Ref(name) => Ok(reference(name)),
        Node::Concat(items) => Ok(concat(lower_all(builder, items, rule_name)?)),
        Node::Alternative(branches) => Ok(alternative(lower_all(builder, branches, rule_name)?)),
        Node::Repeat { node, min, max } => {
            let inner = lower(builder, node, rule_name)?;
            builder.seq(*min, *max, inner)
        }
        Node::Suggest { node, suggestion } => {
            let suggest = builder.lookup_suggestion(suggestion).ok_or_else(|| {
                GrammarError::UnknownSuggestion {
                    name: suggestion.clone(),
                    rule: rule_name.to_owned(),
                }
            })?;
            lower(builder, node, rule_name)?.with_suggestion(suggest)
        }
    }
}

fn lower_all(
    builder: &mut GrammarBuilder,
    nodes: &[Node],
    rule_name: &str,
) -> Result<Vec<Rule>, GrammarError> {
    nodes
        .iter()
        .map(|node| lower(builder, node, rule_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::suggest::suggest_lower_letter;
    use crate::{Grammar, GrammarBuilder, GrammarError, ParsanError};

    #[test]
    fn definitions_are_registered() {
        let grammar = Grammar::from_dsl("a = \"x\";\nb = a a;").unwrap();
        assert_eq!(grammar.names(), vec!["a", "b"]);
        assert_eq!(grammar.sanitize("b", "xx").unwrap(), vec!["xx"]);
    }

    #[test]
    fn duplicate_definition_is_rejected() {
        let result = Grammar::from_dsl("a = \"x\";\na = \"y\";");
        assert!(matches!(
            result,
            Err(ParsanError::Grammar(GrammarError::DuplicateRule { name })) if name == "a"
        ));
    }

    #[test]
    fn unknown_suggestion_is_rejected() {
        let result = Grammar::from_dsl("word = 'a'..'z'@lower;");
        assert!(matches!(
            result,
            Err(ParsanError::Grammar(GrammarError::UnknownSuggestion { name, rule }))
                if name == "lower" && rule == "word"
        ));
    }

    #[test]
    fn suggestion_on_reference_is_rejected() {
        let mut builder = GrammarBuilder::new();
        builder.suggestion("lower", suggest_lower_letter());
        let result = builder.load_dsl("a = 'a'..'z';\nb = a@lower;");
        assert!(matches!(
            result,
            Err(ParsanError::Grammar(GrammarError::SuggestionUnsupported { kind: "reference" }))
        ));
    }

    #[test]
    fn registered_suggestion_is_applied() {
        let mut builder = GrammarBuilder::new();
        builder.suggestion("lower", suggest_lower_letter());
        builder.load_dsl("word = ('a'..'z')@lower+;").unwrap();
        let grammar = builder.build();
        assert_eq!(grammar.sanitize("word", "aBc").unwrap(), vec!["abc"]);
    }

    #[test]
    fn max_annotation_caps_the_rule() {
        let grammar = Grammar::from_dsl("word (max 3) = 'a'..'z'+;").unwrap();
        let rule = grammar.rule("word").unwrap();
        assert_eq!(rule.declared_max_length(), Some(3));
        assert_eq!(grammar.sanitize("word", "abcdef").unwrap(), vec!["abc"]);
    }

    #[test]
    fn repetition_forms() {
        let grammar = Grammar::from_dsl("two = 'a'{2};\nsome = 'a'{1,2};\nany = 'a'*;").unwrap();
        assert_eq!(grammar.sanitize("two", "aa").unwrap(), vec!["aa"]);
        assert!(grammar.sanitize("two", "aaa").unwrap().is_empty());
        assert_eq!(grammar.sanitize("some", "a").unwrap(), vec!["a"]);
        assert!(grammar.sanitize("some", "aaa").unwrap().is_empty());
        assert_eq!(grammar.sanitize("any", "").unwrap(), vec![""]);
        assert_eq!(grammar.sanitize("any", "aaaa").unwrap(), vec!["aaaa"]);
    }

    #[test]
    fn forward_references_resolve() {
        let grammar = Grammar::from_dsl("list = item (\",\" list)?;\nitem = '0'..'9';").unwrap();
        assert_eq!(grammar.sanitize("list", "1,2,3").unwrap(), vec!["1,2,3"]);
        assert!(grammar.unresolved_references().is_empty());
    }
}
