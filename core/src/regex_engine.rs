//! [`Engine`] binding for the `regex` crate's byte-oriented API.
//!
//! Errors are written into the slot with the same wording the engine's C API
//! uses, plus a structured [`ErrorCode`] so classification does not depend on
//! that wording.

use regex::bytes::{Regex as BytesRegex, RegexBuilder};

use crate::boundary::{ErrorCode, ErrorSlot, SYNTAX_ERROR_PREFIX};
use crate::engine::{CaptureSet, Engine, EngineOptions, Span};
use crate::EngineFlags;

/// The `regex` crate as an [`Engine`].
///
/// Compiled handles are `Send + Sync`: matching on a compiled `regex` is
/// reentrant, so a [`Regex`](crate::Regex) built on this engine can be shared
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEngine;

/// Cursor for [`RegexEngine`] iteration.
#[derive(Debug, Clone, Copy)]
pub struct RegexIter {
    last_end: usize,
    last_match: Option<usize>,
}

impl RegexEngine {
    fn next_match<T>(
        iter: &mut RegexIter,
        haystack: &[u8],
        mut search: impl FnMut(usize) -> Option<(Span, T)>,
    ) -> Option<T> {
        loop {
            if iter.last_end > haystack.len() {
                return None;
            }
            let (span, found) = search(iter.last_end)?;
            if span.is_empty() {
                // Guarantee progress; the next match starts at least one byte on.
                iter.last_end = span.end + 1;
                if Some(span.end) == iter.last_match {
                    continue;
                }
            } else {
                iter.last_end = span.end;
            }
            iter.last_match = Some(span.end);
            return Some(found);
        }
    }
}

fn to_capture_set(caps: &regex::bytes::Captures<'_>) -> CaptureSet {
    caps.iter()
        .map(|m| m.map(|m| Span::new(m.start(), m.end())))
        .collect()
}

impl Engine for RegexEngine {
    type Handle = BytesRegex;
    type Iter = RegexIter;

    fn compile(
        &self,
        pattern: &[u8],
        flags: EngineFlags,
        options: &EngineOptions,
        err: &mut ErrorSlot,
    ) -> Option<BytesRegex> {
        let pattern = match std::str::from_utf8(pattern) {
            Ok(p) => p,
            Err(e) => {
                err.set(e.to_string());
                return None;
            }
        };

        let mut builder = RegexBuilder::new(pattern);
        builder
            .case_insensitive(flags.contains(EngineFlags::CASEI))
            .multi_line(flags.contains(EngineFlags::MULTI))
            .dot_matches_new_line(flags.contains(EngineFlags::DOTNL))
            .swap_greed(flags.contains(EngineFlags::SWAP_GREED))
            .ignore_whitespace(flags.contains(EngineFlags::SPACE))
            .unicode(flags.contains(EngineFlags::UNICODE));
        if let Some(limit) = options.size_limit {
            builder.size_limit(limit);
        }
        if let Some(limit) = options.dfa_size_limit {
            builder.dfa_size_limit(limit);
        }

        match builder.build() {
            Ok(re) => Some(re),
            Err(regex::Error::Syntax(msg)) => {
                err.set_with_code(ErrorCode::Syntax, format!("{SYNTAX_ERROR_PREFIX}: {msg}"));
                None
            }
            Err(e @ regex::Error::CompiledTooBig(_)) => {
                err.set_with_code(ErrorCode::SizeLimit, e.to_string());
                None
            }
            Err(e) => {
                err.set(e.to_string());
                None
            }
        }
    }

    fn is_match(
        &self,
        handle: &BytesRegex,
        haystack: &[u8],
        start: usize,
        _err: &mut ErrorSlot,
    ) -> bool {
        handle.is_match_at(haystack, start)
    }

    fn find(
        &self,
        handle: &BytesRegex,
        haystack: &[u8],
        start: usize,
        _err: &mut ErrorSlot,
    ) -> Option<Span> {
        handle
            .find_at(haystack, start)
            .map(|m| Span::new(m.start(), m.end()))
    }

    fn captures(
        &self,
        handle: &BytesRegex,
        haystack: &[u8],
        start: usize,
        _err: &mut ErrorSlot,
    ) -> Option<CaptureSet> {
        handle
            .captures_at(haystack, start)
            .map(|caps| to_capture_set(&caps))
    }

    fn iter_new(&self, _handle: &BytesRegex, start: usize) -> RegexIter {
        RegexIter {
            last_end: start,
            last_match: None,
        }
    }

    fn iter_next(
        &self,
        handle: &BytesRegex,
        iter: &mut RegexIter,
        haystack: &[u8],
        _err: &mut ErrorSlot,
    ) -> Option<Span> {
        Self::next_match(iter, haystack, |at| {
            handle.find_at(haystack, at).map(|m| {
                let span = Span::new(m.start(), m.end());
                (span, span)
            })
        })
    }

    fn iter_next_captures(
        &self,
        handle: &BytesRegex,
        iter: &mut RegexIter,
        haystack: &[u8],
        _err: &mut ErrorSlot,
    ) -> Option<CaptureSet> {
        Self::next_match(iter, haystack, |at| {
            let caps = handle.captures_at(haystack, at)?;
            let whole = caps.get(0)?;
            Some((Span::new(whole.start(), whole.end()), to_capture_set(&caps)))
        })
    }

    fn capture_names(&self, handle: &BytesRegex) -> Vec<Option<Vec<u8>>> {
        handle
            .capture_names()
            .map(|name| name.map(|n| n.as_bytes().to_vec()))
            .collect()
    }
}
