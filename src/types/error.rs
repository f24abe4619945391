use thiserror::Error;

/// Errors raised while constructing a grammar. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("a {kind} rule does not accept a suggestion function")]
    SuggestionUnsupported { kind: &'static str },

    #[error("could not mint a unique rule name with prefix '{prefix}' after {attempts} attempts")]
    NameExhausted { prefix: String, attempts: usize },

    #[error("duplicate rule name '{name}'")]
    DuplicateRule { name: String },

    #[error("undefined suggestion '{name}' in rule '{rule}'")]
    UnknownSuggestion { name: String, rule: String },

    #[error("undefined rule '{name}'")]
    UndefinedRule { name: String },
}
