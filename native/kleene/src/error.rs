//! # Error Types

/// Errors from building, compiling or loading automata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A regular expression could not be parsed or evaluated.
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        /// Character offset into the expression.
        position: usize,
        /// What went wrong.
        message: String,
    },

    /// An automaton broke a structural invariant at a construction boundary.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A textual automaton description was malformed.
    #[error("line {line}: {message}")]
    Format {
        /// 1-based line number in the description.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation(message.into())
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }
}

/// Result type for automaton operations.
pub type Result<T> = std::result::Result<T, Error>;
