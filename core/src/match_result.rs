//! `Match`: one match over a haystack.
//!
//! # Lazy captures
//!
//! A match found without submatch tracking knows only its overall span. The
//! first call that needs group data (`group`, `groups`, `start(1)`,
//! `lastindex`, ...) performs one more boundary call, a captures call from
//! the match's own start over the same haystack, and memoizes the result.
//! Group 0 alone never triggers it.
//!
//! # Offsets
//!
//! [`start`](Match::start), [`end`](Match::end) and [`span`](Match::span)
//! return **byte** offsets into [`haystack`](Match::haystack), not character
//! offsets. On haystacks with multi-byte characters a
//! [`Diagnostic::ByteOffsets`] is logged.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use crate::diagnostic::emit;
use crate::engine::{CaptureSet, Engine, Span};
use crate::{Diagnostic, GroupRef, Haystack, Regex, RegexEngine, RegexError};

/// A successful match.
pub struct Match<'r, 'h, E: Engine = RegexEngine> {
    regex: &'r Regex<E>,
    haystack: Haystack<'h>,
    span: Span,
    pos: usize,
    endpos: Option<usize>,
    captures: OnceCell<CaptureSet>,
}

impl<'r, 'h, E: Engine> Match<'r, 'h, E> {
    pub(crate) fn new(
        regex: &'r Regex<E>,
        haystack: Haystack<'h>,
        span: Span,
        pos: usize,
        endpos: Option<usize>,
        captures: Option<CaptureSet>,
    ) -> Self {
        let cell = OnceCell::new();
        if let Some(caps) = captures {
            let _ = cell.set(caps);
        }
        Self {
            regex,
            haystack,
            span,
            pos,
            endpos,
            captures: cell,
        }
    }

    /// The pattern that produced this match.
    #[must_use]
    pub fn regex(&self) -> &'r Regex<E> {
        self.regex
    }

    /// The exact buffer the offsets refer to.
    #[must_use]
    pub fn haystack(&self) -> Haystack<'h> {
        self.haystack
    }

    /// The caller's `pos` argument.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The caller's `endpos` argument.
    #[must_use]
    pub fn endpos(&self) -> Option<usize> {
        self.endpos
    }

    /// Span of the whole match. Never needs a boundary call.
    #[must_use]
    pub fn whole(&self) -> Span {
        self.span
    }

    /// Returns `true` if group spans are already known.
    #[must_use]
    pub fn has_captures(&self) -> bool {
        self.captures.get().is_some()
    }

    /// Every group's span, computing them on first use.
    ///
    /// # Errors
    ///
    /// Any error from the recomputing boundary call.
    pub fn captures(&self) -> Result<&CaptureSet, RegexError> {
        if let Some(caps) = self.captures.get() {
            return Ok(caps);
        }
        let caps = self
            .regex
            .compiled()
            .captures(self.haystack.as_bytes(), self.span.start)?
            .filter(|caps| caps.first().copied().flatten() == Some(self.span))
            .ok_or_else(|| RegexError::Engine {
                message: format!(
                    "captures call did not reproduce the match at {}..{}",
                    self.span.start, self.span.end
                ),
            })?;
        Ok(self.captures.get_or_init(|| caps))
    }

    /// Span of one group, `None` if it did not participate.
    ///
    /// # Errors
    ///
    /// [`RegexError::Index`] for an unknown group, or a boundary-call error.
    pub fn group_span<'g>(
        &self,
        group: impl Into<GroupRef<'g>>,
    ) -> Result<Option<Span>, RegexError> {
        let index = self.regex.group_map().resolve(group.into())?;
        if index == 0 {
            return Ok(Some(self.span));
        }
        Ok(self.captures()?.get(index).copied().flatten())
    }

    /// Raw bytes of one group.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn group_bytes<'g>(
        &self,
        group: impl Into<GroupRef<'g>>,
    ) -> Result<Option<&'h [u8]>, RegexError> {
        Ok(self
            .group_span(group)?
            .map(|span| &self.haystack.as_bytes()[span.range()]))
    }

    /// Decoded text of one group, `None` if it did not participate.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn group<'g>(
        &self,
        group: impl Into<GroupRef<'g>>,
    ) -> Result<Option<Cow<'h, str>>, RegexError> {
        let group = group.into();
        let index = self.regex.group_map().resolve(group)?;
        Ok(self.group_bytes(group)?.map(|b| decode(b, index)))
    }

    /// Like [`group`](Self::group), substituting `default` for a group that
    /// did not participate.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn group_or<'g, 'd>(
        &self,
        group: impl Into<GroupRef<'g>>,
        default: &'d str,
    ) -> Result<Cow<'d, str>, RegexError>
    where
        'h: 'd,
    {
        Ok(self.group(group)?.unwrap_or(Cow::Borrowed(default)))
    }

    /// Text of every group except group 0, `default` for non-participants.
    ///
    /// # Errors
    ///
    /// Any error from the recomputing boundary call.
    pub fn groups<'d>(
        &self,
        default: Option<&'d str>,
    ) -> Result<Vec<Option<Cow<'d, str>>>, RegexError>
    where
        'h: 'd,
    {
        let caps = self.captures()?;
        Ok((1..self.regex.group_map().len())
            .map(|i| self.decode_slot(caps, i).or_else(|| default.map(Cow::Borrowed)))
            .collect())
    }

    /// Text of every named group keyed by name, `default` for non-participants.
    ///
    /// # Errors
    ///
    /// Any error from the recomputing boundary call.
    pub fn groupdict<'d>(
        &self,
        default: Option<&'d str>,
    ) -> Result<HashMap<&'r str, Option<Cow<'d, str>>>, RegexError>
    where
        'h: 'd,
    {
        let caps = self.captures()?;
        let regex: &'r Regex<E> = self.regex;
        Ok(regex
            .group_map()
            .named()
            .map(|(name, i)| {
                let value = self.decode_slot(caps, i).or_else(|| default.map(Cow::Borrowed));
                (name, value)
            })
            .collect())
    }

    /// Byte offset where `group` starts, `-1` if it did not participate.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn start<'g>(&self, group: impl Into<GroupRef<'g>>) -> Result<isize, RegexError> {
        self.warn_offsets("start");
        Ok(self.group_span(group)?.map_or(-1, |s| offset(s.start)))
    }

    /// Byte offset where `group` ends, `-1` if it did not participate.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn end<'g>(&self, group: impl Into<GroupRef<'g>>) -> Result<isize, RegexError> {
        self.warn_offsets("end");
        Ok(self.group_span(group)?.map_or(-1, |s| offset(s.end)))
    }

    /// `(start, end)` of `group`, `(-1, -1)` if it did not participate.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn span<'g>(&self, group: impl Into<GroupRef<'g>>) -> Result<(isize, isize), RegexError> {
        self.warn_offsets("span");
        Ok(self
            .group_span(group)?
            .map_or((-1, -1), |s| (offset(s.start), offset(s.end))))
    }

    /// Highest-indexed participating group other than group 0.
    ///
    /// # Errors
    ///
    /// Any error from the recomputing boundary call.
    pub fn lastindex(&self) -> Result<Option<usize>, RegexError> {
        if self.regex.group_map().len() <= 1 {
            return Ok(None);
        }
        Ok(self
            .captures()?
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find_map(|(i, span)| span.map(|_| i)))
    }

    /// Name of the [`lastindex`](Self::lastindex) group, if it has one.
    ///
    /// # Errors
    ///
    /// Any error from the recomputing boundary call.
    pub fn lastgroup(&self) -> Result<Option<&'r str>, RegexError> {
        let regex: &'r Regex<E> = self.regex;
        Ok(self.lastindex()?.and_then(|i| regex.group_map().name(i)))
    }

    /// Template expansion. Not supported by the engine.
    ///
    /// # Errors
    ///
    /// Always [`RegexError::Unsupported`].
    pub fn expand(&self, _template: &str) -> Result<String, RegexError> {
        Err(RegexError::unsupported("expand"))
    }

    /// The diagnostic decoding `group` surfaces, if any.
    ///
    /// [`Diagnostic::LossyDecode`] when the group's bytes are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Same as [`group_span`](Self::group_span).
    pub fn decode_diagnostic<'g>(
        &self,
        group: impl Into<GroupRef<'g>>,
    ) -> Result<Option<Diagnostic>, RegexError> {
        let group = group.into();
        let index = self.regex.group_map().resolve(group)?;
        Ok(self
            .group_bytes(group)?
            .filter(|b| std::str::from_utf8(b).is_err())
            .map(|_| Diagnostic::LossyDecode { group: index }))
    }

    /// The diagnostic an offset accessor on this match surfaces, if any.
    #[must_use]
    pub fn offset_diagnostic(&self, operation: &'static str) -> Option<Diagnostic> {
        self.haystack
            .has_multibyte()
            .then_some(Diagnostic::ByteOffsets { operation })
    }

    fn warn_offsets(&self, operation: &'static str) {
        if let Some(d) = self.offset_diagnostic(operation) {
            emit(&d);
        }
    }

    fn decode_slot(&self, caps: &CaptureSet, index: usize) -> Option<Cow<'h, str>> {
        let bytes: &'h [u8] = self.haystack.as_bytes();
        caps.get(index)
            .copied()
            .flatten()
            .map(|span| decode(&bytes[span.range()], index))
    }
}

fn decode(bytes: &[u8], group: usize) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        emit(&Diagnostic::LossyDecode { group });
    }
    text
}

fn offset(byte: usize) -> isize {
    isize::try_from(byte).unwrap_or(isize::MAX)
}

impl<E: Engine> fmt::Debug for Match<'_, '_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = &self.haystack.as_bytes()[self.span.range()];
        f.debug_struct("Match")
            .field("span", &(self.span.start..self.span.end))
            .field("match", &String::from_utf8_lossy(bytes))
            .finish()
    }
}

impl<E: Engine> PartialEq for Match<'_, '_, E> {
    /// Two matches are equal when they cover the same span of the same buffer.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.regex, other.regex)
            && self.haystack == other.haystack
            && self.span == other.span
    }
}
