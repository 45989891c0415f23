//! Type-erased sequences.

use std::fmt;

use super::{Kind, Sequence};
use crate::Error;

/// Object-safe view of [`Sequence`], including cloning.
trait DynSequence<'a, T> {
    fn next_value(&mut self) -> Result<Option<T>, Error>;
    fn complete(&self) -> bool;
    fn clone_boxed(&self) -> Result<Box<dyn DynSequence<'a, T> + 'a>, Error>;
    fn variant(&self) -> Kind;
}

impl<'a, S> DynSequence<'a, S::Item> for S
where
    S: Sequence + 'a,
{
    fn next_value(&mut self) -> Result<Option<S::Item>, Error> {
        Sequence::next(self)
    }

    fn complete(&self) -> bool {
        self.is_complete()
    }

    fn clone_boxed(&self) -> Result<Box<dyn DynSequence<'a, S::Item> + 'a>, Error> {
        Ok(Box::new(self.try_clone()?))
    }

    fn variant(&self) -> Kind {
        self.kind()
    }
}

/// A sequence whose concrete pipeline type has been erased.
///
/// Useful for returning pipelines of different shapes from one function.
/// Cloning still works: it clones the erased pipeline.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::{Boxed, Sequence, iterate, range};
///
/// fn evens(from_array: bool) -> Boxed<'static, i64> {
///     if from_array {
///         iterate(vec![2, 4, 6]).boxed()
///     } else {
///         range(1, 6).filter(|value| value % 2 == 0).boxed()
///     }
/// }
///
/// assert_eq!(evens(true).to_array().unwrap(), vec![2, 4, 6]);
/// assert_eq!(evens(false).try_clone().unwrap().to_array().unwrap(), vec![2, 4, 6]);
/// ```
pub struct Boxed<'a, T> {
    inner: Box<dyn DynSequence<'a, T> + 'a>,
}

impl<'a, T> Boxed<'a, T> {
    pub(crate) fn new<S>(sequence: S) -> Self
    where
        S: Sequence<Item = T> + 'a,
    {
        Self {
            inner: Box::new(sequence),
        }
    }
}

impl<T> Sequence for Boxed<'_, T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>, Error> {
        self.inner.next_value()
    }

    fn is_complete(&self) -> bool {
        self.inner.complete()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            inner: self.inner.clone_boxed()?,
        })
    }

    fn kind(&self) -> Kind {
        self.inner.variant()
    }
}

impl<T> fmt::Debug for Boxed<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Boxed")
            .field("kind", &self.inner.variant())
            .field("complete", &self.inner.complete())
            .finish()
    }
}
