//! rure - Python `re`-shaped adapter over a linear-time regex engine
//!
//! The adapter does no matching itself. It translates flags, windows and group
//! lookups into calls on an [`Engine`], classifies the engine's errors, and
//! rebuilds match objects from the byte offsets the engine returns.
//!
//! # Architecture
//!
//! - [`boundary`]: every engine call goes through [`boundary::call`], which
//!   passes a fresh [`ErrorSlot`] and turns its message into a [`RegexError`]
//! - [`translate`]: caller [`Flags`] (Python bit values) → [`EngineFlags`],
//!   with a [`Diagnostic`] per flag the engine cannot honor
//! - [`CompiledPattern`]: sole owner of the engine's automaton; released once
//! - [`GroupMap`]: group names and indices, read once at compile time
//! - [`Regex`]: `is_match`, `search`, `match_at`, `finditer`, `findall`
//! - [`Match`]: group text, byte offsets, `lastindex`, `groupdict`
//!
//! # Key Design Insights
//!
//! 1. **No match is not an error.** Searches return `Ok(None)`; errors are
//!    only what the boundary gateway classifies as such.
//!
//! 2. **Offsets are bytes.** Every offset a [`Match`] reports indexes the
//!    encoded haystack. `pos`/`endpos` on text are characters and are
//!    converted before the engine sees them.
//!
//! 3. **Borrowed results.** A [`Match`] borrows its pattern and its haystack,
//!    so neither can be released while a match is alive.
//!
//! # Example
//!
//! ```
//! use rure::prelude::*;
//!
//! let re = Regex::new(r"(?P<year>\d{4})-(?P<month>\d{2})", Flags::empty()).unwrap();
//!
//! let m = re.search("released 2016-08", 0, None).unwrap().unwrap();
//! assert_eq!(m.group("year").unwrap().as_deref(), Some("2016"));
//! assert_eq!(m.span("month").unwrap(), (14, 16));
//!
//! // Unsupported engine features fail fast.
//! assert!(matches!(re.sub("x", "2016-08", 0), Err(RegexError::Unsupported { .. })));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod adapter;
pub mod boundary;
mod compiled;
mod diagnostic;
mod engine;
mod error;
mod flags;
mod group_map;
mod iter;
mod match_result;
mod options;
mod regex_engine;
mod subject;
#[cfg(test)]
mod testing;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Adapter surface
pub use adapter::Regex;
pub use iter::{FindIter, Matches};
pub use match_result::Match;
pub use options::Options;
pub use subject::{Haystack, Subject};

// Flags
pub use flags::{translate, EngineFlags, Flag, Flags, Translation};

// Group model
pub use group_map::{GroupMap, GroupRef};

// Errors and diagnostics
pub use boundary::{ErrorCode, ErrorSlot};
pub use diagnostic::Diagnostic;
pub use error::RegexError;

// Engine boundary
pub use compiled::CompiledPattern;
pub use engine::{CaptureSet, Engine, EngineOptions, Span};
pub use regex_engine::{RegexEngine, RegexIter};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use rure::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Diagnostic, Flag, Flags, GroupRef, Match, Matches, Options, Regex, RegexError, Span,
        Subject,
    };
}
