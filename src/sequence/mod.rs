//! The lazy sequence engine.
//!
//! A [`Sequence`] is a stateful, pull-based producer of a possibly infinite
//! run of values. Sources ([`iterate`], [`range`], [`counter`], [`generate`],
//! [`unfold`]) produce values; combinators ([`Sequence::filter`],
//! [`Sequence::map`], [`Sequence::zip`], ...) wrap one or two upstream
//! sequences; terminal operations ([`Sequence::reduce`],
//! [`Sequence::to_array`], ...) drive the pull protocol to exhaustion.
//!
//! Nothing is computed until a value is pulled and no intermediate
//! collection is built, except where an operation needs one
//! ([`Sequence::take_last`]).
//!
//! # Protocol
//!
//! - `next()` returns `Ok(Some(value))` while values remain and `Ok(None)`
//!   once the sequence has ended. After the first `Ok(None)` every later
//!   call returns `Ok(None)` too.
//! - `is_complete()` reports whether that end has been observed. It cannot
//!   predict the end: it only becomes `true` after an exhausting `next()`.
//! - `try_clone()` returns an independent copy positioned exactly where the
//!   original is. Pipelines fed by a [`generate`] or [`unfold`] source refuse
//!   with [`Error::NotClonable`].
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::sequence::{Sequence, counter, iterate, range_step};
//!
//! let odd = iterate(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10])
//!     .filter(|value| value % 2 == 1)
//!     .to_array()
//!     .unwrap();
//! assert_eq!(odd, vec![1, 3, 5, 7, 9]);
//!
//! let down = range_step(10, 1, -3).unwrap().to_array().unwrap();
//! assert_eq!(down, vec![10, 7, 4, 1]);
//!
//! let first_five = counter().take(5).to_array().unwrap();
//! assert_eq!(first_five, vec![1, 2, 3, 4, 5]);
//! ```
//!
//! ## Cloning
//!
//! ```rust
//! use lazyseq::sequence::{Sequence, iterate};
//!
//! let mut original = iterate(vec![1, 2, 3, 4]).map(|value| value * 10);
//! assert_eq!(original.next().unwrap(), Some(10));
//!
//! let copy = original.try_clone().unwrap();
//! assert_eq!(copy.to_array().unwrap(), vec![20, 30, 40]);
//! assert_eq!(original.to_array().unwrap(), vec![20, 30, 40]);
//! ```

mod boxed;
mod combine;
mod into_iter;
mod kind;
mod latch;
mod select;
mod source;
mod transform;
mod truthy;

pub use boxed::Boxed;
pub use combine::{Concat, PackedZip, Zip};
pub use into_iter::IntoIter;
pub use kind::Kind;
pub use select::{Every, Filter, Skip, SkipWhile, Take, TakeLast, TakeWhile, TryFilter};
pub use source::{
    Array, Callback, Generator, Range, counter, counter_from, generate, iterate, range,
    range_step, try_generate, try_unfold, unfold,
};
pub use transform::{Enumerate, Map, TryMap};
pub use truthy::Truthy;

pub(crate) use latch::Latch;

use crate::Error;

/// A lazy, pull-based, clonable producer of values.
///
/// Implementors provide the four protocol methods; every combinator and
/// terminal operation is a provided method built on them.
///
/// Callbacks passed to combinators are `Fn` closures. A combinator keeps its
/// callback behind an `Rc`, so a clone of the pipeline shares the callback
/// rather than copying it. Use interior mutability (`Cell`, `RefCell`) when a
/// callback needs state.
pub trait Sequence {
    /// The type of value produced.
    type Item;

    /// Pulls the next value.
    ///
    /// Returns `Ok(None)` at the end of the sequence and on every call after
    /// it. Errors raised by callbacks or external sources are returned as-is
    /// and do not end the sequence: a failed pull consumes one upstream
    /// position, and the next call resumes after it. Positional combinators
    /// ([`Sequence::take`], [`Sequence::skip`], [`Sequence::every`],
    /// [`Sequence::enumerate`], [`Sequence::zip`], [`Sequence::packed_zip`])
    /// count that position, and [`Sequence::take_last`] keeps the values it
    /// had already buffered.
    ///
    /// # Errors
    ///
    /// Whatever the upstream source or a callback returns, plus
    /// [`Error::NoValueProduced`] from [`Sequence::try_map`].
    fn next(&mut self) -> Result<Option<Self::Item>, Error>;

    /// Returns `true` once `next()` has reported the end of the sequence.
    fn is_complete(&self) -> bool;

    /// Returns an independent copy positioned where `self` is.
    ///
    /// Pulling from the copy does not affect `self`, and both produce the
    /// same remaining values.
    ///
    /// # Errors
    ///
    /// [`Error::NotClonable`] when the pipeline contains a generator or
    /// callback source.
    fn try_clone(&self) -> Result<Self, Error>
    where
        Self: Sized;

    /// The variant tag of this sequence.
    fn kind(&self) -> Kind;

    // -------------------------------------------------------------------------
    // Combinators
    // -------------------------------------------------------------------------

    /// Keeps only the values for which `predicate` holds.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Like [`Sequence::filter`] with a fallible predicate.
    fn try_filter<P>(self, predicate: P) -> TryFilter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> Result<bool, Error>,
    {
        TryFilter::new(self, predicate)
    }

    /// Applies `function` to every value.
    fn map<U, F>(self, function: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        Map::new(self, function)
    }

    /// Applies a fallible mapping that may produce nothing.
    ///
    /// `Ok(None)` from `function` is a protocol violation: `next()` fails with
    /// [`Error::NoValueProduced`] at that element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::{Error, sequence::{Sequence, iterate}};
    ///
    /// let mut halves = iterate(vec![2, 4, 5])
    ///     .try_map(|value: i32| Ok((value % 2 == 0).then_some(value / 2)));
    /// assert_eq!(halves.next().unwrap(), Some(1));
    /// assert_eq!(halves.next().unwrap(), Some(2));
    /// assert!(matches!(halves.next(), Err(Error::NoValueProduced { position: 3, .. })));
    /// ```
    fn try_map<U, F>(self, function: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> Result<Option<U>, Error>,
    {
        TryMap::new(self, function)
    }

    /// Yields at most `count` values.
    fn take(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, count)
    }

    /// Yields values while `predicate` holds.
    ///
    /// The first value that fails the predicate is yielded as well; the
    /// sequence ends on the following call.
    ///
    /// ```rust
    /// use lazyseq::sequence::{Sequence, iterate};
    ///
    /// let values = iterate(vec![1, 2, 5, 1]).take_while(|value| *value < 3);
    /// assert_eq!(values.to_array().unwrap(), vec![1, 2, 5]);
    /// ```
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    /// Yields the final `count` values.
    ///
    /// The upstream is drained on the first pull, keeping a sliding window of
    /// the last `count` values. Never use it on an infinite sequence.
    fn take_last(self, count: usize) -> TakeLast<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        TakeLast::new(self, count)
    }

    /// Discards the first `count` values.
    fn skip(self, count: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, count)
    }

    /// Discards values while `predicate` holds, then yields the rest untested.
    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, predicate)
    }

    /// Yields the first value and then every `step`-th value after it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `step` is zero.
    fn every(self, step: usize) -> Result<Every<Self>, Error>
    where
        Self: Sized,
    {
        Every::new(self, step)
    }

    /// Pairs each value with the next value of `other`.
    ///
    /// The pairing is asymmetric: the sequence ends when `self` ends. Once
    /// `other` runs out, the second half of each pair is `None`. Use
    /// [`Sequence::packed_zip`] to stop at the shorter of the two.
    ///
    /// ```rust
    /// use lazyseq::sequence::{Sequence, iterate};
    ///
    /// let pairs = iterate(vec![1, 2, 3]).zip(vec!['a', 'b']).to_array().unwrap();
    /// assert_eq!(pairs, vec![(1, Some('a')), (2, Some('b')), (3, None)]);
    /// ```
    fn zip<B>(self, other: B) -> Zip<Self, B::Sequence>
    where
        Self: Sized,
        B: IntoSequence,
    {
        Zip::new(self, other.into_sequence())
    }

    /// Pairs values of `self` and `other`, ending as soon as either ends.
    fn packed_zip<B>(self, other: B) -> PackedZip<Self, B::Sequence>
    where
        Self: Sized,
        B: IntoSequence,
    {
        PackedZip::new(self, other.into_sequence())
    }

    /// Yields every value of `self`, then every value of `other`.
    fn concat<B>(self, other: B) -> Concat<Self, B::Sequence>
    where
        Self: Sized,
        B: IntoSequence<Item = Self::Item>,
    {
        Concat::new(self, other.into_sequence())
    }

    /// Prefixes every value with its 1-based position.
    fn enumerate(self) -> Enumerate<Self>
    where
        Self: Sized,
    {
        Enumerate::new(self)
    }

    /// Erases the concrete pipeline type.
    fn boxed<'a>(self) -> Boxed<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        Boxed::new(self)
    }

    // -------------------------------------------------------------------------
    // Terminal operations
    // -------------------------------------------------------------------------

    /// Calls `action` on every value until the sequence ends.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn foreach<F>(mut self, mut action: F) -> Result<(), Error>
    where
        Self: Sized,
        F: FnMut(Self::Item),
    {
        while let Some(value) = self.next()? {
            action(value);
        }
        Ok(())
    }

    /// Like [`Sequence::foreach`] with a fallible action.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline or by `action`.
    fn try_foreach<F>(mut self, mut action: F) -> Result<(), Error>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> Result<(), Error>,
    {
        while let Some(value) = self.next()? {
            action(value)?;
        }
        Ok(())
    }

    /// Folds the sequence left to right starting from `initial`.
    ///
    /// An empty sequence returns `initial` unchanged.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn reduce<A, F>(mut self, initial: A, mut function: F) -> Result<A, Error>
    where
        Self: Sized,
        F: FnMut(A, Self::Item) -> A,
    {
        let mut accumulator = initial;
        while let Some(value) = self.next()? {
            accumulator = function(accumulator, value);
        }
        Ok(accumulator)
    }

    /// Like [`Sequence::reduce`] with a fallible reducer.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline or by `function`.
    fn try_reduce<A, F>(mut self, initial: A, mut function: F) -> Result<A, Error>
    where
        Self: Sized,
        F: FnMut(A, Self::Item) -> Result<A, Error>,
    {
        let mut accumulator = initial;
        while let Some(value) = self.next()? {
            accumulator = function(accumulator, value)?;
        }
        Ok(accumulator)
    }

    /// Folds the sequence using its first value as the seed.
    ///
    /// Returns `Ok(None)` for an empty sequence.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn reduce_first<F>(mut self, function: F) -> Result<Option<Self::Item>, Error>
    where
        Self: Sized,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        match self.next()? {
            Some(first) => self.reduce(first, function).map(Some),
            None => Ok(None),
        }
    }

    /// Returns `true` if any value is truthy, stopping at the first one.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn any(self) -> Result<bool, Error>
    where
        Self: Sized,
        Self::Item: Truthy,
    {
        self.any_by(<Self::Item as Truthy>::is_truthy)
    }

    /// Returns `true` if `predicate` holds for any value, stopping at the first one.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn any_by<P>(mut self, mut predicate: P) -> Result<bool, Error>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(value) = self.next()? {
            if predicate(&value) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns `true` if every value is truthy, stopping at the first that is not.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn all(self) -> Result<bool, Error>
    where
        Self: Sized,
        Self::Item: Truthy,
    {
        self.all_by(<Self::Item as Truthy>::is_truthy)
    }

    /// Returns `true` if `predicate` holds for every value, stopping at the first that fails.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn all_by<P>(mut self, mut predicate: P) -> Result<bool, Error>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(value) = self.next()? {
            if !predicate(&value) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Counts every value.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn count(self) -> Result<usize, Error>
    where
        Self: Sized,
    {
        self.count_by(|_| true)
    }

    /// Counts the values for which `predicate` holds. Always traverses everything.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn count_by<P>(mut self, mut predicate: P) -> Result<usize, Error>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        let mut count = 0;
        while let Some(value) = self.next()? {
            if predicate(&value) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Drains the sequence and returns the final value, if any.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn last(mut self) -> Result<Option<Self::Item>, Error>
    where
        Self: Sized,
    {
        let mut last = None;
        while let Some(value) = self.next()? {
            last = Some(value);
        }
        Ok(last)
    }

    /// Collects every remaining value into a `Vec`.
    ///
    /// # Errors
    ///
    /// The first error returned by the pipeline.
    fn to_array(mut self) -> Result<Vec<Self::Item>, Error>
    where
        Self: Sized,
    {
        let mut values = Vec::new();
        while let Some(value) = self.next()? {
            values.push(value);
        }
        Ok(values)
    }

    /// Turns the pipeline into a standard [`Iterator`] of results.
    ///
    /// ```rust
    /// use lazyseq::sequence::{Sequence, range};
    ///
    /// let total: i64 = range(1, 4).to_generator().map(Result::unwrap).sum();
    /// assert_eq!(total, 10);
    /// ```
    fn to_generator(self) -> IntoIter<Self>
    where
        Self: Sized,
    {
        IntoIter::new(self)
    }
}

/// Conversion into a [`Sequence`].
///
/// Implemented by every sequence (identity) and by `Vec<T>` and `[T; N]`
/// (through [`iterate`]), so combinators such as [`Sequence::zip`] accept
/// either a pipeline or a plain collection.
pub trait IntoSequence {
    /// The type of value produced.
    type Item;
    /// The resulting sequence.
    type Sequence: Sequence<Item = Self::Item>;

    /// Performs the conversion.
    fn into_sequence(self) -> Self::Sequence;
}

impl<S: Sequence> IntoSequence for S {
    type Item = S::Item;
    type Sequence = S;

    #[inline]
    fn into_sequence(self) -> Self::Sequence {
        self
    }
}

impl<T: Clone> IntoSequence for Vec<T> {
    type Item = T;
    type Sequence = Array<T>;

    #[inline]
    fn into_sequence(self) -> Self::Sequence {
        iterate(self)
    }
}

impl<T: Clone, const N: usize> IntoSequence for [T; N] {
    type Item = T;
    type Sequence = Array<T>;

    #[inline]
    fn into_sequence(self) -> Self::Sequence {
        iterate(self)
    }
}
