//! Error types for grammar construction.

use thiserror::Error;

/// Errors that can occur while building or expanding a straight-line grammar.
///
/// These are programmer errors rather than runtime conditions: a correct
/// algorithm run on a valid input never raises one.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("input string must not be empty")]
    EmptyInput,

    #[error("closure violation: `{0}` is used on a right-hand side but has no production")]
    ClosureViolation(String),

    #[error("cannot expand nonterminal `{0}`: no production found (closure broken)")]
    UnresolvedNonterminal(String),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
