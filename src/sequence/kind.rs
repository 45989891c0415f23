//! Variant tags for sequences.

use std::fmt;

/// Identifies which source or combinator a sequence is.
///
/// A [`Boxed`](super::Boxed) sequence reports the kind of the sequence it
/// erases, so the tag always names a concrete variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A snapshot of a finite collection.
    Array,
    /// A bounded integer range.
    Range,
    /// An unbounded integer counter.
    Counter,
    /// An external producer driven one value at a time. Not clonable.
    Generator,
    /// A repeatedly invoked callback with hidden state. Not clonable.
    Callback,
    /// [`Filter`](super::Filter) or [`TryFilter`](super::TryFilter).
    Filter,
    /// [`Map`](super::Map) or [`TryMap`](super::TryMap).
    Map,
    /// [`Take`](super::Take).
    Take,
    /// [`TakeWhile`](super::TakeWhile).
    TakeWhile,
    /// [`TakeLast`](super::TakeLast).
    TakeLast,
    /// [`Skip`](super::Skip).
    Skip,
    /// [`SkipWhile`](super::SkipWhile).
    SkipWhile,
    /// [`Every`](super::Every).
    Every,
    /// [`Zip`](super::Zip).
    Zip,
    /// [`PackedZip`](super::PackedZip).
    PackedZip,
    /// [`Concat`](super::Concat).
    Concat,
    /// [`Enumerate`](super::Enumerate).
    Enumerate,
}

impl Kind {
    /// Returns `true` for sources with no upstream.
    pub const fn is_source(self) -> bool {
        matches!(
            self,
            Self::Array | Self::Range | Self::Counter | Self::Generator | Self::Callback
        )
    }

    /// Returns `true` unless this kind is a source that can never be cloned.
    pub const fn is_replayable(self) -> bool {
        !matches!(self, Self::Generator | Self::Callback)
    }

    /// Number of upstream sequences a variant of this kind wraps.
    pub const fn arity(self) -> usize {
        match self {
            Self::Array | Self::Range | Self::Counter | Self::Generator | Self::Callback => 0,
            Self::Zip | Self::PackedZip | Self::Concat => 2,
            _ => 1,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Range => "range",
            Self::Counter => "counter",
            Self::Generator => "generator",
            Self::Callback => "callback",
            Self::Filter => "filter",
            Self::Map => "map",
            Self::Take => "take",
            Self::TakeWhile => "take_while",
            Self::TakeLast => "take_last",
            Self::Skip => "skip",
            Self::SkipWhile => "skip_while",
            Self::Every => "every",
            Self::Zip => "zip",
            Self::PackedZip => "packed_zip",
            Self::Concat => "concat",
            Self::Enumerate => "enumerate",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
