//! `Regex`: the Python `re`-shaped pattern object.
//!
//! Every operation encodes the caller's window ([`Subject::window`]), makes
//! its boundary calls through the compiled pattern, and wraps byte offsets
//! into [`Match`] values that borrow both the pattern and the haystack.

use std::collections::HashMap;
use std::fmt;

use crate::compiled::CompiledPattern;
use crate::diagnostic::emit;
use crate::engine::Engine;
use crate::flags::translate;
use crate::iter::Matches;
use crate::{
    Diagnostic, EngineFlags, Flags, GroupMap, Haystack, Match, Options, RegexEngine, RegexError,
    Subject,
};

/// A compiled pattern with Python `re` semantics on top of an [`Engine`].
///
/// Construction never returns a partially usable value: compile errors abort
/// it. Construction diagnostics (unsupported flags, byte patterns) are kept
/// and available from [`diagnostics`](Self::diagnostics).
///
/// `Regex<RegexEngine>` is `Send + Sync`; matches against it may run from
/// several threads at once, each over its own haystack.
///
/// # Example
///
/// ```
/// use rure::{Flags, Regex};
///
/// let re = Regex::new(r"(?P<word>\w+)", Flags::empty()).unwrap();
/// let words: Vec<String> = re
///     .findall("hi there", 0, None)
///     .unwrap()
///     .iter()
///     .map(|m| m.group("word").unwrap().unwrap().into_owned())
///     .collect();
/// assert_eq!(words, ["hi", "there"]);
/// ```
pub struct Regex<E: Engine = RegexEngine> {
    pattern: String,
    flags: Flags,
    options: Options,
    compiled: CompiledPattern<E>,
    diagnostics: Vec<Diagnostic>,
}

impl Regex<RegexEngine> {
    /// Compile `pattern` with default options.
    ///
    /// # Errors
    ///
    /// [`RegexError::Syntax`], [`RegexError::SizeLimitExceeded`], or
    /// [`RegexError::Engine`].
    pub fn new<'p>(pattern: impl Into<Subject<'p>>, flags: Flags) -> Result<Self, RegexError> {
        Self::with_engine(RegexEngine, pattern, flags, Options::default())
    }

    /// Compile `pattern` with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_options<'p>(
        pattern: impl Into<Subject<'p>>,
        flags: Flags,
        options: Options,
    ) -> Result<Self, RegexError> {
        Self::with_engine(RegexEngine, pattern, flags, options)
    }
}

impl<E: Engine> Regex<E> {
    /// Compile `pattern` on a specific engine.
    ///
    /// # Errors
    ///
    /// Same as [`Regex::new`].
    pub fn with_engine<'p>(
        engine: E,
        pattern: impl Into<Subject<'p>>,
        flags: Flags,
        options: Options,
    ) -> Result<Self, RegexError> {
        let pattern = pattern.into();
        let mut diagnostics: Vec<Diagnostic> = pattern.diagnostic("new").into_iter().collect();

        let translation = translate(flags);
        diagnostics.extend(translation.diagnostics);

        let bytes = match pattern {
            Subject::Text(s) => s.as_bytes(),
            Subject::Bytes(b) => b,
        };
        let compiled = CompiledPattern::compile(
            engine,
            bytes,
            translation.engine_flags,
            &options.engine_options(),
        )?;

        for d in &diagnostics {
            emit(d);
        }

        Ok(Self {
            pattern: String::from_utf8_lossy(bytes).into_owned(),
            flags,
            options,
            compiled,
            diagnostics,
        })
    }

    /// The pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Caller flags as given.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Flags handed to the engine.
    #[must_use]
    pub fn engine_flags(&self) -> EngineFlags {
        self.compiled.flags()
    }

    /// Options as given.
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Diagnostics raised while constructing this pattern.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Group model of this pattern.
    #[must_use]
    pub fn group_map(&self) -> &GroupMap {
        self.compiled.groups()
    }

    /// Number of explicit groups (group 0 excluded).
    #[must_use]
    pub fn groups(&self) -> usize {
        self.group_map().len().saturating_sub(1)
    }

    /// Named groups mapped to their indices.
    #[must_use]
    pub fn groupindex(&self) -> HashMap<&str, usize> {
        self.group_map().named().collect()
    }

    /// Group names as the engine reports them, group 0 included.
    #[must_use]
    pub fn capture_names(&self) -> Vec<Option<String>> {
        self.compiled
            .capture_names()
            .into_iter()
            .map(|n| n.map(|n| String::from_utf8_lossy(&n).into_owned()))
            .collect()
    }

    pub(crate) fn compiled(&self) -> &CompiledPattern<E> {
        &self.compiled
    }

    /// Release the compiled pattern now rather than at drop.
    pub fn release(self) {
        let Self { compiled, .. } = self;
        compiled.release();
    }

    /// Does the pattern match anywhere in the window?
    ///
    /// The cheapest operation: no spans are produced.
    ///
    /// # Errors
    ///
    /// Any boundary-call error.
    pub fn is_match<'h>(
        &self,
        subject: impl Into<Subject<'h>>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Result<bool, RegexError> {
        let haystack = prepare(subject.into(), "is_match", pos, endpos);
        if !haystack.is_searchable() {
            return Ok(false);
        }
        self.compiled.is_match(haystack.as_bytes(), haystack.start())
    }

    /// First match in the window.
    ///
    /// With [`Options::submatches`] the match carries every group's span;
    /// otherwise groups are computed on first access.
    ///
    /// # Errors
    ///
    /// Any boundary-call error.
    pub fn search<'h>(
        &self,
        subject: impl Into<Subject<'h>>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Result<Option<Match<'_, 'h, E>>, RegexError> {
        let haystack = prepare(subject.into(), "search", pos, endpos);
        self.search_haystack(haystack, pos, endpos)
    }

    /// First match in the window that starts exactly at `pos`.
    ///
    /// This is Python's `match`: a [`search`](Self::search) followed by an
    /// anchoring check, not a separate engine call.
    ///
    /// # Errors
    ///
    /// Any boundary-call error.
    pub fn match_at<'h>(
        &self,
        subject: impl Into<Subject<'h>>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Result<Option<Match<'_, 'h, E>>, RegexError> {
        let haystack = prepare(subject.into(), "match", pos, endpos);
        Ok(self
            .search_haystack(haystack, pos, endpos)?
            .filter(|m| m.whole().start == haystack.start()))
    }

    /// Every non-overlapping match in the window, lazily.
    ///
    /// The returned [`Matches`] is restartable: each iteration begins a new
    /// engine iteration at `pos`.
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` leaves room for engines whose
    /// iterator construction is a boundary call.
    pub fn finditer<'h>(
        &self,
        subject: impl Into<Subject<'h>>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Result<Matches<'_, 'h, E>, RegexError> {
        let haystack = prepare(subject.into(), "finditer", pos, endpos);
        Ok(Matches::new(self, haystack, pos, endpos))
    }

    /// Every non-overlapping match in the window, collected.
    ///
    /// # Errors
    ///
    /// The first boundary-call error raised during iteration.
    pub fn findall<'h>(
        &self,
        subject: impl Into<Subject<'h>>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Result<Vec<Match<'_, 'h, E>>, RegexError> {
        let haystack = prepare(subject.into(), "findall", pos, endpos);
        Matches::new(self, haystack, pos, endpos).iter().collect()
    }

    /// Split by matches. Not supported by the engine.
    ///
    /// # Errors
    ///
    /// Always [`RegexError::Unsupported`].
    pub fn split<'h>(
        &self,
        subject: impl Into<Subject<'h>>,
        _maxsplit: usize,
    ) -> Result<Vec<String>, RegexError> {
        warn_subject(subject.into(), "split");
        Err(RegexError::unsupported("split"))
    }

    /// Substitute matches. Not supported by the engine.
    ///
    /// # Errors
    ///
    /// Always [`RegexError::Unsupported`].
    pub fn sub<'h>(
        &self,
        _repl: &str,
        subject: impl Into<Subject<'h>>,
        _count: usize,
    ) -> Result<String, RegexError> {
        warn_subject(subject.into(), "sub");
        Err(RegexError::unsupported("sub"))
    }

    /// Substitute matches and count them. Not supported by the engine.
    ///
    /// # Errors
    ///
    /// Always [`RegexError::Unsupported`].
    pub fn subn<'h>(
        &self,
        _repl: &str,
        subject: impl Into<Subject<'h>>,
        _count: usize,
    ) -> Result<(String, usize), RegexError> {
        warn_subject(subject.into(), "subn");
        Err(RegexError::unsupported("subn"))
    }

    fn search_haystack<'h>(
        &self,
        haystack: Haystack<'h>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Result<Option<Match<'_, 'h, E>>, RegexError> {
        if !haystack.is_searchable() {
            return Ok(None);
        }
        let (bytes, start) = (haystack.as_bytes(), haystack.start());

        if self.options.submatches {
            let Some(caps) = self.compiled.captures(bytes, start)? else {
                return Ok(None);
            };
            let Some(whole) = caps.first().copied().flatten() else {
                return Ok(None);
            };
            Ok(Some(Match::new(self, haystack, whole, pos, endpos, Some(caps))))
        } else {
            Ok(self
                .compiled
                .find(bytes, start)?
                .map(|whole| Match::new(self, haystack, whole, pos, endpos, None)))
        }
    }
}

fn warn_subject(subject: Subject<'_>, operation: &'static str) {
    if let Some(d) = subject.diagnostic(operation) {
        emit(&d);
    }
}

fn prepare<'h>(
    subject: Subject<'h>,
    operation: &'static str,
    pos: usize,
    endpos: Option<usize>,
) -> Haystack<'h> {
    warn_subject(subject, operation);
    subject.window(pos, endpos)
}

impl<E: Engine> fmt::Debug for Regex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regex")
            .field("pattern", &self.pattern)
            .field("flags", &self.flags)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
