//! `GroupMap`: stable group indices and names for one compiled pattern.

use std::collections::HashMap;

use crate::RegexError;

/// Ordered group names plus the reverse name → index table.
///
/// Built once from the engine's `capture_names()` and never changed, so a
/// name resolves to the same index for the lifetime of the pattern.
/// Index 0 is the whole match and is always unnamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMap {
    names: Vec<Option<String>>,
    index: HashMap<String, usize>,
}

impl GroupMap {
    /// Build from raw engine names.
    #[must_use]
    pub fn from_capture_names(raw: Vec<Option<Vec<u8>>>) -> Self {
        let names: Vec<Option<String>> = raw
            .into_iter()
            .map(|name| name.map(|n| String::from_utf8_lossy(&n).into_owned()))
            .collect();
        let index = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| name.as_ref().map(|n| (n.clone(), i)))
            .collect();
        Self { names, index }
    }

    /// Number of groups, group 0 included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false` for a map built from a real pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the group at `index`, if it has one.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(Option::as_deref)
    }

    /// Index of the group called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Names in index order.
    #[must_use]
    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    /// Named groups as `(name, index)` pairs, ordered by index.
    pub fn named(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| name.as_deref().map(|n| (n, i)))
    }

    /// Resolve a caller's group reference to an index.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::Index`] for negative or out-of-range indices and
    /// unknown names.
    pub fn resolve(&self, group: GroupRef<'_>) -> Result<usize, RegexError> {
        match group {
            GroupRef::Index(i) => usize::try_from(i)
                .ok()
                .filter(|&i| i < self.len())
                .ok_or_else(|| RegexError::index(i)),
            GroupRef::Name(name) => self.index_of(name).ok_or_else(|| RegexError::index(name)),
        }
    }
}

/// A group named by the caller, by index or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRef<'a> {
    /// Positional index; negative values are always rejected.
    Index(i64),
    /// Group name.
    Name(&'a str),
}

impl From<usize> for GroupRef<'_> {
    fn from(i: usize) -> Self {
        GroupRef::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<i64> for GroupRef<'_> {
    fn from(i: i64) -> Self {
        GroupRef::Index(i)
    }
}

impl From<i32> for GroupRef<'_> {
    fn from(i: i32) -> Self {
        GroupRef::Index(i64::from(i))
    }
}

impl<'a> From<&'a str> for GroupRef<'a> {
    fn from(name: &'a str) -> Self {
        GroupRef::Name(name)
    }
}

impl<'a> From<&'a String> for GroupRef<'a> {
    fn from(name: &'a String) -> Self {
        GroupRef::Name(name.as_str())
    }
}
