//! Non-fatal diagnostics.
//!
//! Diagnostics never interrupt an operation. Construction diagnostics are kept
//! on the [`Regex`](crate::Regex); every diagnostic is also logged through the
//! `log` facade under the `rure` target.

use std::fmt;

use crate::Flag;

/// A non-fatal notice about a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A caller flag has no engine equivalent and was dropped.
    UnsupportedFlag {
        /// The dropped flag.
        flag: Flag,
    },
    /// The caller passed pre-encoded bytes; offsets may split characters.
    UndecodedInput {
        /// The operation that received the bytes.
        operation: &'static str,
    },
    /// Offsets were requested on a haystack containing multi-byte characters.
    ByteOffsets {
        /// The accessor that returned byte offsets.
        operation: &'static str,
    },
    /// A group's bytes were not valid UTF-8 and were decoded lossily.
    LossyDecode {
        /// Index of the affected group.
        group: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFlag { flag } => {
                write!(f, "the engine doesn't support the flag '{flag}'")
            }
            Self::UndecodedInput { operation } => write!(
                f,
                "expect undefined behavior by not passing text to Regex::{operation}"
            ),
            Self::ByteOffsets { operation } => write!(
                f,
                "Match::{operation} returns byte offsets; use them with Match::haystack"
            ),
            Self::LossyDecode { group } => {
                write!(f, "group {group} is not valid UTF-8 and was decoded lossily")
            }
        }
    }
}

pub(crate) fn emit(diagnostic: &Diagnostic) {
    log::warn!(target: "rure", "{diagnostic}");
}
