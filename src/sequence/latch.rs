//! The completion latch every sequence carries.

/// Completion state of a sequence.
///
/// Moves from `Open` to `Closed` the first time the sequence reports its end
/// and never moves back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Latch {
    /// Values may still be produced.
    #[default]
    Open,
    /// The end has been observed; `next()` returns `Ok(None)` from now on.
    Closed,
}

impl Latch {
    #[inline]
    pub(crate) const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    #[inline]
    pub(crate) const fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Passes `item` through, closing the latch when it is the end signal.
    #[inline]
    pub(crate) fn observe<T>(&mut self, item: Option<T>) -> Option<T> {
        if item.is_none() {
            self.close();
        }
        item
    }
}
