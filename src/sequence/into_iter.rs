//! Bridging a sequence into the standard [`Iterator`] protocol.

use std::iter::FusedIterator;

use super::Sequence;
use crate::Error;

/// A standard iterator over the results of a sequence. See
/// [`Sequence::to_generator`].
///
/// Yields `Ok(value)` for each value and `Err(error)` for each failed pull;
/// a failed pull does not end iteration.
#[derive(Debug)]
pub struct IntoIter<S> {
    sequence: S,
}

impl<S> IntoIter<S> {
    pub(crate) const fn new(sequence: S) -> Self {
        Self { sequence }
    }

    /// Returns the underlying sequence.
    pub fn into_inner(self) -> S {
        self.sequence
    }
}

impl<S: Sequence> Iterator for IntoIter<S> {
    type Item = Result<S::Item, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.next().transpose()
    }
}

impl<S: Sequence> FusedIterator for IntoIter<S> {}
