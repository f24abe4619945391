//! The grammar DSL: one `name [(max N)] = body ;` definition per rule.

mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::{Definition, Node, ParsedGrammar};

/// Parse DSL text into its definitions without building any rules.
///
/// # Errors
///
/// Returns [`ParseError`] pointing at the first offending character.
pub fn parse(input: &str) -> Result<ParsedGrammar, ParseError> {
    use winnow::Parser;
    grammar::parse_grammar.parse(input).map_err(|e| {
        let context = e.inner().to_string();
        let message = if context.is_empty() {
            "unexpected input".to_owned()
        } else {
            context
        };
        ParseError::at(input, e.offset(), message)
    })
}
