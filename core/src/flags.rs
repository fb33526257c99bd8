//! Caller flags and their translation onto engine flags.
//!
//! [`Flags`] is bit-compatible with Python's `re` module so existing flag
//! words can be passed through unchanged. [`Flag`] is the closed set of
//! recognized flags; its [`engine_equivalent`](Flag::engine_equivalent) match
//! is the translation table, checked for exhaustiveness by the compiler.

use bitflags::bitflags;

use crate::Diagnostic;

bitflags! {
    /// Caller-facing flag word.
    ///
    /// Bits not listed here are ignored by [`translate`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        /// Case-insensitive matching (`re.IGNORECASE`).
        const IGNORECASE = 2;
        /// Locale-dependent classes (`re.LOCALE`). No engine equivalent.
        const LOCALE = 4;
        /// `^`/`$` match at line boundaries (`re.MULTILINE`).
        const MULTILINE = 8;
        /// `.` matches `\n` (`re.DOTALL`).
        const DOTALL = 16;
        /// Unicode classes (`re.UNICODE`). Always on in the engine.
        const UNICODE = 32;
        /// Whitespace and `#` comments ignored in the pattern (`re.VERBOSE`).
        const VERBOSE = 64;
        /// Swap the meaning of greedy and lazy quantifiers.
        const UNGREEDY = 512;
    }
}

bitflags! {
    /// Engine flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EngineFlags: u32 {
        /// Case-insensitive.
        const CASEI = 1 << 0;
        /// Multi-line anchors.
        const MULTI = 1 << 1;
        /// Dot matches newline.
        const DOTNL = 1 << 2;
        /// Swap greediness.
        const SWAP_GREED = 1 << 3;
        /// Insignificant whitespace.
        const SPACE = 1 << 4;
        /// Unicode mode.
        const UNICODE = 1 << 5;
    }
}

impl EngineFlags {
    /// The engine's fixed starting point: Unicode mode on.
    pub const DEFAULT: Self = Self::UNICODE;
}

impl Default for EngineFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A recognized caller flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    IgnoreCase,
    Locale,
    Multiline,
    DotAll,
    Unicode,
    Verbose,
    Ungreedy,
}

impl Flag {
    /// Every recognized flag, in bit order.
    pub const ALL: [Flag; 7] = [
        Flag::IgnoreCase,
        Flag::Locale,
        Flag::Multiline,
        Flag::DotAll,
        Flag::Unicode,
        Flag::Verbose,
        Flag::Ungreedy,
    ];

    /// The caller bit for this flag.
    #[must_use]
    pub const fn bit(self) -> Flags {
        match self {
            Flag::IgnoreCase => Flags::IGNORECASE,
            Flag::Locale => Flags::LOCALE,
            Flag::Multiline => Flags::MULTILINE,
            Flag::DotAll => Flags::DOTALL,
            Flag::Unicode => Flags::UNICODE,
            Flag::Verbose => Flags::VERBOSE,
            Flag::Ungreedy => Flags::UNGREEDY,
        }
    }

    /// The engine bit this flag maps to, `None` when the engine has no equivalent.
    #[must_use]
    pub const fn engine_equivalent(self) -> Option<EngineFlags> {
        match self {
            Flag::IgnoreCase => Some(EngineFlags::CASEI),
            Flag::Locale => None,
            Flag::Multiline => Some(EngineFlags::MULTI),
            Flag::DotAll => Some(EngineFlags::DOTNL),
            Flag::Unicode => Some(EngineFlags::UNICODE),
            Flag::Verbose => Some(EngineFlags::SPACE),
            Flag::Ungreedy => Some(EngineFlags::SWAP_GREED),
        }
    }

    /// The flag's name as Python spells it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Flag::IgnoreCase => "IGNORECASE",
            Flag::Locale => "LOCALE",
            Flag::Multiline => "MULTILINE",
            Flag::DotAll => "DOTALL",
            Flag::Unicode => "UNICODE",
            Flag::Verbose => "VERBOSE",
            Flag::Ungreedy => "UNGREEDY",
        }
    }

    /// Parse a single-letter inline flag (`i`, `L`, `m`, `s`, `u`, `x`, `U`).
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'i' => Some(Flag::IgnoreCase),
            'L' => Some(Flag::Locale),
            'm' => Some(Flag::Multiline),
            's' => Some(Flag::DotAll),
            'u' => Some(Flag::Unicode),
            'x' => Some(Flag::Verbose),
            'U' => Some(Flag::Ungreedy),
            _ => None,
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of [`translate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Flag word to hand to the engine.
    pub engine_flags: EngineFlags,
    /// One entry per caller flag that could not be honored.
    pub diagnostics: Vec<Diagnostic>,
}

/// Translate caller flags onto engine flags.
///
/// Pure: diagnostics are returned, not emitted.
#[must_use]
pub fn translate(flags: Flags) -> Translation {
    let mut engine_flags = EngineFlags::DEFAULT;
    let mut diagnostics = Vec::new();

    for flag in Flag::ALL {
        if !flags.contains(flag.bit()) {
            continue;
        }
        match flag.engine_equivalent() {
            Some(bit) => engine_flags |= bit,
            None => diagnostics.push(Diagnostic::UnsupportedFlag { flag }),
        }
    }

    Translation {
        engine_flags,
        diagnostics,
    }
}
