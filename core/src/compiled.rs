//! `CompiledPattern`: exclusive owner of one engine automaton.

use std::fmt;

use crate::boundary::{self, ErrorSlot};
use crate::engine::{CaptureSet, Engine, EngineOptions, Span};
use crate::{EngineFlags, GroupMap, RegexError};

/// One compiled (pattern, engine flags) pair.
///
/// Immutable after construction. The engine handle is released exactly once,
/// when the pattern is dropped or [`release`](Self::release)d; both consume the
/// only owner, so no call can reach a released handle.
pub struct CompiledPattern<E: Engine> {
    engine: E,
    handle: E::Handle,
    flags: EngineFlags,
    groups: GroupMap,
}

impl<E: Engine> CompiledPattern<E> {
    /// Compile `pattern` and read its group names once.
    ///
    /// A handle the engine returned together with an error is dropped, and
    /// thereby released, before the error is returned.
    ///
    /// # Errors
    ///
    /// [`RegexError::Syntax`], [`RegexError::SizeLimitExceeded`], or
    /// [`RegexError::Engine`] as classified by the boundary gateway.
    pub fn compile(
        engine: E,
        pattern: &[u8],
        flags: EngineFlags,
        options: &EngineOptions,
    ) -> Result<Self, RegexError> {
        let mut slot = ErrorSlot::new();
        let raw = engine.compile(pattern, flags, options, &mut slot);
        if let Err(e) = boundary::check(&slot) {
            drop(raw);
            return Err(e);
        }
        let handle = raw.ok_or_else(|| RegexError::Engine {
            message: "engine returned no pattern".into(),
        })?;

        let groups = GroupMap::from_capture_names(engine.capture_names(&handle));
        log::debug!(
            target: "rure",
            "compiled pattern with {} groups, flags {:?}",
            groups.len(),
            flags
        );
        Ok(Self {
            engine,
            handle,
            flags,
            groups,
        })
    }

    /// Release the engine resource now.
    pub fn release(self) {
        drop(self);
    }

    /// Flags the pattern was compiled with.
    #[must_use]
    pub fn flags(&self) -> EngineFlags {
        self.flags
    }

    /// Group model derived at compile time.
    #[must_use]
    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    /// Ask the engine for the group names again.
    #[must_use]
    pub fn capture_names(&self) -> Vec<Option<Vec<u8>>> {
        self.engine.capture_names(&self.handle)
    }

    /// # Errors
    ///
    /// Any boundary-call error.
    pub fn is_match(&self, haystack: &[u8], start: usize) -> Result<bool, RegexError> {
        boundary::call(|err| self.engine.is_match(&self.handle, haystack, start, err))
    }

    /// # Errors
    ///
    /// Any boundary-call error.
    pub fn find(&self, haystack: &[u8], start: usize) -> Result<Option<Span>, RegexError> {
        boundary::call(|err| self.engine.find(&self.handle, haystack, start, err))
    }

    /// # Errors
    ///
    /// Any boundary-call error.
    pub fn captures(
        &self,
        haystack: &[u8],
        start: usize,
    ) -> Result<Option<CaptureSet>, RegexError> {
        boundary::call(|err| self.engine.captures(&self.handle, haystack, start, err))
    }

    pub(crate) fn iter_new(&self, start: usize) -> E::Iter {
        self.engine.iter_new(&self.handle, start)
    }

    pub(crate) fn iter_next(
        &self,
        iter: &mut E::Iter,
        haystack: &[u8],
    ) -> Result<Option<Span>, RegexError> {
        boundary::call(|err| self.engine.iter_next(&self.handle, iter, haystack, err))
    }

    pub(crate) fn iter_next_captures(
        &self,
        iter: &mut E::Iter,
        haystack: &[u8],
    ) -> Result<Option<CaptureSet>, RegexError> {
        boundary::call(|err| {
            self.engine
                .iter_next_captures(&self.handle, iter, haystack, err)
        })
    }
}

impl<E: Engine> Drop for CompiledPattern<E> {
    fn drop(&mut self) {
        log::trace!(target: "rure", "releasing compiled pattern");
    }
}

impl<E: Engine> fmt::Debug for CompiledPattern<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("flags", &self.flags)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}
