//! The engine boundary.
//!
//! [`Engine`] is the narrow surface the adapter consumes from a matching
//! engine: compile, match, capture, iterate, introspect. Every fallible
//! function receives an [`ErrorSlot`] and reports failure there only; callers
//! go through [`boundary::call`](crate::boundary::call) to read it.
//!
//! All offsets crossing this boundary are byte offsets into the haystack
//! passed to the same call.

use crate::boundary::ErrorSlot;
use crate::EngineFlags;

/// Half-open byte range `[start, end)` in a haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Create a span. `start` must not exceed `end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} > end {end}");
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for zero-length spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a range, for slicing the haystack.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Per-group spans of one match. Index 0 is the whole match and is always
/// present; `None` marks a group that did not participate.
pub type CaptureSet = Vec<Option<Span>>;

/// Engine-level tuning knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Approximate byte limit on the compiled program.
    pub size_limit: Option<usize>,
    /// Approximate byte limit on the lazy DFA cache.
    pub dfa_size_limit: Option<usize>,
}

/// A linear-time matching engine.
///
/// # Resource ownership
///
/// `Handle` owns the engine's compiled automaton and must release it on
/// drop. Bindings over a foreign library wrap the raw pointer in a type whose
/// `Drop` frees it; the adapter never frees handles any other way.
///
/// # Reentrancy
///
/// The adapter issues concurrent matches against one handle only when
/// `Handle: Sync`. An engine that does not guarantee reentrant matching on a
/// compiled automaton must not implement `Sync` for its handle.
pub trait Engine {
    /// Compiled-pattern resource.
    type Handle;

    /// Iteration cursor over one haystack.
    type Iter;

    /// Compile a pattern. On failure the slot is set; a handle may still be
    /// returned, and the caller drops it.
    fn compile(
        &self,
        pattern: &[u8],
        flags: EngineFlags,
        options: &EngineOptions,
        err: &mut ErrorSlot,
    ) -> Option<Self::Handle>;

    /// Report whether the pattern matches anywhere at or after `start`.
    fn is_match(
        &self,
        handle: &Self::Handle,
        haystack: &[u8],
        start: usize,
        err: &mut ErrorSlot,
    ) -> bool;

    /// Leftmost-first match at or after `start`.
    fn find(
        &self,
        handle: &Self::Handle,
        haystack: &[u8],
        start: usize,
        err: &mut ErrorSlot,
    ) -> Option<Span>;

    /// Leftmost-first match at or after `start`, with every group's span.
    fn captures(
        &self,
        handle: &Self::Handle,
        haystack: &[u8],
        start: usize,
        err: &mut ErrorSlot,
    ) -> Option<CaptureSet>;

    /// Start an iteration at `start`.
    fn iter_new(&self, handle: &Self::Handle, start: usize) -> Self::Iter;

    /// Next non-overlapping match. Empty matches advance the cursor by at least
    /// one byte, and an empty match adjacent to the previous match is skipped.
    fn iter_next(
        &self,
        handle: &Self::Handle,
        iter: &mut Self::Iter,
        haystack: &[u8],
        err: &mut ErrorSlot,
    ) -> Option<Span>;

    /// Like [`iter_next`](Self::iter_next), with every group's span.
    fn iter_next_captures(
        &self,
        handle: &Self::Handle,
        iter: &mut Self::Iter,
        haystack: &[u8],
        err: &mut ErrorSlot,
    ) -> Option<CaptureSet>;

    /// Group names in index order, including the unnamed group 0.
    fn capture_names(&self, handle: &Self::Handle) -> Vec<Option<Vec<u8>>>;
}
