//! Lazy, restartable match iteration.

use crate::engine::Engine;
use crate::{Haystack, Match, Regex, RegexEngine, RegexError};

/// The result of [`Regex::finditer`].
///
/// Holds the window, not an engine cursor: [`iter`](Self::iter) starts a
/// fresh engine iteration at `pos` every time it is called.
pub struct Matches<'r, 'h, E: Engine = RegexEngine> {
    regex: &'r Regex<E>,
    haystack: Haystack<'h>,
    pos: usize,
    endpos: Option<usize>,
}

impl<'r, 'h, E: Engine> Matches<'r, 'h, E> {
    pub(crate) fn new(
        regex: &'r Regex<E>,
        haystack: Haystack<'h>,
        pos: usize,
        endpos: Option<usize>,
    ) -> Self {
        Self {
            regex,
            haystack,
            pos,
            endpos,
        }
    }

    /// Begin a new pass over the window.
    #[must_use]
    pub fn iter(&self) -> FindIter<'r, 'h, E> {
        let state = self
            .haystack
            .is_searchable()
            .then(|| self.regex.compiled().iter_new(self.haystack.start()));
        FindIter {
            regex: self.regex,
            haystack: self.haystack,
            pos: self.pos,
            endpos: self.endpos,
            state,
        }
    }

    /// The window being iterated.
    #[must_use]
    pub fn haystack(&self) -> Haystack<'h> {
        self.haystack
    }
}

impl<'r, 'h, E: Engine> IntoIterator for &Matches<'r, 'h, E> {
    type Item = Result<Match<'r, 'h, E>, RegexError>;
    type IntoIter = FindIter<'r, 'h, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'r, 'h, E: Engine> IntoIterator for Matches<'r, 'h, E> {
    type Item = Result<Match<'r, 'h, E>, RegexError>;
    type IntoIter = FindIter<'r, 'h, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass of match iteration.
///
/// Yields matches left to right, never overlapping. Each yielded [`Match`]
/// owns its captures (or recomputes them from its own span), so it stays
/// valid after the iterator advances. A boundary-call error is yielded once
/// and ends the pass.
pub struct FindIter<'r, 'h, E: Engine = RegexEngine> {
    regex: &'r Regex<E>,
    haystack: Haystack<'h>,
    pos: usize,
    endpos: Option<usize>,
    state: Option<E::Iter>,
}

impl<'r, 'h, E: Engine> FindIter<'r, 'h, E> {
    fn advance(&mut self) -> Result<Option<Match<'r, 'h, E>>, RegexError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(None);
        };
        let compiled = self.regex.compiled();
        let bytes = self.haystack.as_bytes();

        loop {
            let found = if self.regex.options().submatches {
                compiled.iter_next_captures(state, bytes)?.and_then(|caps| {
                    caps.first().copied().flatten().map(|whole| (whole, Some(caps)))
                })
            } else {
                compiled.iter_next(state, bytes)?.map(|whole| (whole, None))
            };

            // Empty matches inside an encoded character of caller text are not
            // positions the caller can name.
            if let Some((whole, _)) = &found {
                if whole.is_empty() && !self.haystack.is_char_boundary(whole.start) {
                    continue;
                }
            }

            return Ok(found.map(|(whole, caps)| {
                Match::new(self.regex, self.haystack, whole, self.pos, self.endpos, caps)
            }));
        }
    }
}

impl<'r, 'h, E: Engine> Iterator for FindIter<'r, 'h, E> {
    type Item = Result<Match<'r, 'h, E>, RegexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(m)) => Some(Ok(m)),
            Ok(None) => {
                self.state = None;
                None
            }
            Err(e) => {
                self.state = None;
                Some(Err(e))
            }
        }
    }
}

impl<E: Engine> std::iter::FusedIterator for FindIter<'_, '_, E> {}
