//! Error taxonomy for compilation and matching.

/// Errors from pattern construction and match operations.
///
/// Compile-time variants ([`Syntax`](Self::Syntax),
/// [`SizeLimitExceeded`](Self::SizeLimitExceeded), [`InvalidOptions`](Self::InvalidOptions))
/// abort construction: no partially usable [`Regex`](crate::Regex) is ever returned.
///
/// A search that finds nothing is **not** an error. It is `Ok(None)` / `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegexError {
    /// The pattern is malformed.
    #[error("invalid pattern: {message}")]
    Syntax {
        /// The engine's message.
        message: String,
    },

    /// The compiled automaton exceeds the engine's size limit.
    #[error("compiled pattern too big: {message}")]
    SizeLimitExceeded {
        /// The engine's message.
        message: String,
    },

    /// A boundary call failed with a message no classification rule recognized.
    ///
    /// Engine wording changes land here rather than in a specific kind.
    #[error("engine error: {message}")]
    Engine {
        /// The raw engine message.
        message: String,
    },

    /// The operation has no equivalent in the engine.
    #[error("`{operation}` is not supported by this engine")]
    Unsupported {
        /// Name of the rejected operation (`"split"`, `"sub"`, ...).
        operation: &'static str,
    },

    /// A group was requested by a negative, out-of-range, or unknown index or name.
    #[error("no such group: {group}")]
    Index {
        /// The group as the caller wrote it.
        group: String,
    },

    /// Construction options were malformed or named an unknown option.
    #[error("invalid options: {reason}")]
    InvalidOptions {
        /// Why the options were rejected.
        reason: String,
    },
}

impl RegexError {
    /// Returns `true` for errors raised while compiling a pattern.
    #[must_use]
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. } | Self::SizeLimitExceeded { .. } | Self::InvalidOptions { .. }
        )
    }

    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    pub(crate) fn index(group: impl ToString) -> Self {
        Self::Index {
            group: group.to_string(),
        }
    }
}
