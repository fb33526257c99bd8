//! Construction options.
//!
//! With the `serde` feature, options load from JSON and reject unknown keys,
//! so a misspelled option fails construction instead of being ignored:
//!
//! ```json
//! { "submatches": true, "size_limit": 10485760 }
//! ```

use crate::engine::EngineOptions;
#[cfg(feature = "serde")]
use crate::RegexError;

/// Options recognized by [`Regex::with_options`](crate::Regex::with_options).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Options {
    /// Compute every group's span with each match instead of on first group access.
    pub submatches: bool,
    /// Byte limit on the compiled program.
    pub size_limit: Option<usize>,
    /// Byte limit on the lazy DFA cache.
    pub dfa_size_limit: Option<usize>,
}

impl Options {
    /// Default options: lazy captures, engine default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`submatches`](Self::submatches).
    #[must_use]
    pub fn submatches(mut self, yes: bool) -> Self {
        self.submatches = yes;
        self
    }

    /// Set [`size_limit`](Self::size_limit).
    #[must_use]
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    /// Set [`dfa_size_limit`](Self::dfa_size_limit).
    #[must_use]
    pub fn dfa_size_limit(mut self, bytes: usize) -> Self {
        self.dfa_size_limit = Some(bytes);
        self
    }

    /// The subset handed to the engine.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            size_limit: self.size_limit,
            dfa_size_limit: self.dfa_size_limit,
        }
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::InvalidOptions`] for malformed JSON, wrong value
    /// types, or unknown option names.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, RegexError> {
        serde_json::from_str(json).map_err(|e| RegexError::InvalidOptions {
            reason: e.to_string(),
        })
    }

    /// Parse options from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    #[cfg(feature = "serde")]
    pub fn from_value(value: serde_json::Value) -> Result<Self, RegexError> {
        serde_json::from_value(value).map_err(|e| RegexError::InvalidOptions {
            reason: e.to_string(),
        })
    }
}
