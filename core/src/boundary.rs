//! Boundary call gateway.
//!
//! Engine functions multiplex errors with results: every call receives an
//! [`ErrorSlot`] and the slot, not the return value, says whether the call
//! failed. [`call`] is the only place results and errors are demultiplexed.
//! Operations must never inspect a raw engine result without going through it.
//!
//! # Classification
//!
//! An engine may store a structured [`ErrorCode`] alongside its message; the
//! code wins when present. Otherwise the message is classified by literal
//! prefix in [`classify`]. An engine that rewords its messages degrades to
//! [`RegexError::Engine`] instead of the specific kind. This is a known
//! limitation and is kept in this one function.

use crate::RegexError;

/// Message reported by an untouched slot.
pub const NO_ERROR: &str = "no error";

/// Prefix of the engine's pattern syntax errors.
pub const SYNTAX_ERROR_PREFIX: &str = "Error parsing regex";

/// Prefix of the engine's compiled-size errors.
pub const SIZE_LIMIT_PREFIX: &str = "Compiled regex exceeds size limit";

/// Structured error kinds an engine may report next to its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed pattern.
    Syntax,
    /// Automaton too large.
    SizeLimit,
}

/// Out-parameter error slot passed to every engine function.
///
/// Starts zeroed ("no error"). An engine writes at most one error into it.
#[derive(Debug, Default)]
pub struct ErrorSlot {
    error: Option<SlotError>,
}

#[derive(Debug)]
struct SlotError {
    code: Option<ErrorCode>,
    message: String,
}

impl ErrorSlot {
    /// A fresh, zero-initialized slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text-only error.
    pub fn set(&mut self, message: impl Into<String>) {
        self.error = Some(SlotError {
            code: None,
            message: message.into(),
        });
    }

    /// Record an error with a structured code.
    pub fn set_with_code(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.error = Some(SlotError {
            code: Some(code),
            message: message.into(),
        });
    }

    /// The engine's human-readable message, [`NO_ERROR`] when unset.
    #[must_use]
    pub fn message(&self) -> &str {
        self.error.as_ref().map_or(NO_ERROR, |e| e.message.as_str())
    }

    /// The structured code, if the engine supplied one.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        self.error.as_ref().and_then(|e| e.code)
    }
}

/// Invoke an engine function with a fresh slot and demultiplex the outcome.
///
/// The primary result is returned untouched on success, which may itself be a
/// "no match" value depending on the function.
///
/// # Errors
///
/// Returns the [`RegexError`] the slot classifies to.
pub fn call<T>(f: impl FnOnce(&mut ErrorSlot) -> T) -> Result<T, RegexError> {
    let mut slot = ErrorSlot::new();
    let result = f(&mut slot);
    check(&slot)?;
    Ok(result)
}

/// Classify a slot after a call made without [`call`].
///
/// Used where the caller must release a partially produced result before
/// propagating the error.
///
/// # Errors
///
/// Returns the [`RegexError`] the slot classifies to.
pub fn check(slot: &ErrorSlot) -> Result<(), RegexError> {
    match classify(slot.code(), slot.message()) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Map a slot's code and message to an error, `None` meaning success.
#[must_use]
pub fn classify(code: Option<ErrorCode>, message: &str) -> Option<RegexError> {
    let message = message.to_owned();
    match code {
        Some(ErrorCode::Syntax) => return Some(RegexError::Syntax { message }),
        Some(ErrorCode::SizeLimit) => return Some(RegexError::SizeLimitExceeded { message }),
        None => {}
    }

    if message == NO_ERROR {
        None
    } else if message.starts_with(SYNTAX_ERROR_PREFIX) {
        Some(RegexError::Syntax { message })
    } else if message.starts_with(SIZE_LIMIT_PREFIX) {
        Some(RegexError::SizeLimitExceeded { message })
    } else {
        Some(RegexError::Engine { message })
    }
}
