use thiserror::Error;

use crate::parse::ParseError;
use crate::GrammarError;

/// Unified error type covering DSL parsing, grammar construction, and I/O.
///
/// Returned by convenience methods like [`Grammar::from_dsl()`](crate::Grammar::from_dsl)
/// and [`Grammar::from_file()`](crate::Grammar::from_file).
#[derive(Debug, Error)]
pub enum ParsanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
