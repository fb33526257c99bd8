//! Test engine that reports errors at match time.
//!
//! Wraps [`RegexEngine`] and writes [`FAILURE`] into the error slot on the
//! calls it is told to fail, so the adapter's error paths can be driven
//! without a broken engine.

use crate::boundary::ErrorSlot;
use crate::engine::{CaptureSet, Engine, EngineOptions, Span};
use crate::{EngineFlags, RegexEngine, RegexIter};

/// Message written into the slot by every injected failure.
pub(crate) const FAILURE: &str = "cache exhausted";

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Faulty {
    /// Fail `is_match`, `find` and `captures`.
    pub fail_search: bool,
    /// Fail the iteration step after this many matches.
    pub fail_iter_after: Option<usize>,
    /// Report captures one byte to the right of the real match.
    pub misplace_captures: bool,
}

impl Engine for Faulty {
    type Handle = regex::bytes::Regex;
    type Iter = (RegexIter, usize);

    fn compile(
        &self,
        pattern: &[u8],
        flags: EngineFlags,
        options: &EngineOptions,
        err: &mut ErrorSlot,
    ) -> Option<Self::Handle> {
        RegexEngine.compile(pattern, flags, options, err)
    }

    fn is_match(
        &self,
        handle: &Self::Handle,
        haystack: &[u8],
        start: usize,
        err: &mut ErrorSlot,
    ) -> bool {
        if self.fail_search {
            err.set(FAILURE);
            return false;
        }
        RegexEngine.is_match(handle, haystack, start, err)
    }

    fn find(
        &self,
        handle: &Self::Handle,
        haystack: &[u8],
        start: usize,
        err: &mut ErrorSlot,
    ) -> Option<Span> {
        if self.fail_search {
            err.set(FAILURE);
            return None;
        }
        RegexEngine.find(handle, haystack, start, err)
    }

    fn captures(
        &self,
        handle: &Self::Handle,
        haystack: &[u8],
        start: usize,
        err: &mut ErrorSlot,
    ) -> Option<CaptureSet> {
        if self.fail_search {
            err.set(FAILURE);
            return None;
        }
        let caps = RegexEngine.captures(handle, haystack, start, err)?;
        if !self.misplace_captures {
            return Some(caps);
        }
        Some(
            caps.into_iter()
                .map(|s| s.map(|s| Span::new(s.start + 1, s.end + 1)))
                .collect(),
        )
    }

    fn iter_new(&self, handle: &Self::Handle, start: usize) -> Self::Iter {
        (RegexEngine.iter_new(handle, start), 0)
    }

    fn iter_next(
        &self,
        handle: &Self::Handle,
        iter: &mut Self::Iter,
        haystack: &[u8],
        err: &mut ErrorSlot,
    ) -> Option<Span> {
        if self.fail_iter_after == Some(iter.1) {
            err.set(FAILURE);
            return None;
        }
        iter.1 += 1;
        RegexEngine.iter_next(handle, &mut iter.0, haystack, err)
    }

    fn iter_next_captures(
        &self,
        handle: &Self::Handle,
        iter: &mut Self::Iter,
        haystack: &[u8],
        err: &mut ErrorSlot,
    ) -> Option<CaptureSet> {
        if self.fail_iter_after == Some(iter.1) {
            err.set(FAILURE);
            return None;
        }
        iter.1 += 1;
        RegexEngine.iter_next_captures(handle, &mut iter.0, haystack, err)
    }

    fn capture_names(&self, handle: &Self::Handle) -> Vec<Option<Vec<u8>>> {
        RegexEngine.capture_names(handle)
    }
}
