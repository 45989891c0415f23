//! Free-function forms of the sequence operations.
//!
//! Each function takes anything convertible into a sequence (a pipeline, a
//! `Vec` or an array) as its first argument and forwards to the matching
//! [`Sequence`] method, so `functions::filter(values, predicate)` is the same
//! as `iterate(values).filter(predicate)`.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::functions::{filter, map, reduce};
//!
//! let sum_of_odd_squares = reduce(
//!     map(filter(vec![1, 2, 3, 4, 5], |value| value % 2 == 1), |value| value * value),
//!     0,
//!     |total, value| total + value,
//! );
//! assert_eq!(sum_of_odd_squares.unwrap(), 35);
//! ```

use crate::Error;
use crate::sequence::{
    Concat, Enumerate, Every, Filter, IntoSequence, Map, PackedZip, Sequence, Skip, SkipWhile,
    Take, TakeLast, TakeWhile, Truthy, Zip,
};

/// See [`Sequence::filter`].
pub fn filter<I, P>(iterable: I, predicate: P) -> Filter<I::Sequence, P>
where
    I: IntoSequence,
    P: Fn(&I::Item) -> bool,
{
    iterable.into_sequence().filter(predicate)
}

/// See [`Sequence::map`].
pub fn map<I, U, F>(iterable: I, function: F) -> Map<I::Sequence, F>
where
    I: IntoSequence,
    F: Fn(I::Item) -> U,
{
    iterable.into_sequence().map(function)
}

/// See [`Sequence::take`].
pub fn take<I: IntoSequence>(iterable: I, count: usize) -> Take<I::Sequence> {
    iterable.into_sequence().take(count)
}

/// See [`Sequence::take_while`].
pub fn take_while<I, P>(iterable: I, predicate: P) -> TakeWhile<I::Sequence, P>
where
    I: IntoSequence,
    P: Fn(&I::Item) -> bool,
{
    iterable.into_sequence().take_while(predicate)
}

/// See [`Sequence::take_last`].
pub fn take_last<I>(iterable: I, count: usize) -> TakeLast<I::Sequence>
where
    I: IntoSequence,
    I::Item: Clone,
{
    iterable.into_sequence().take_last(count)
}

/// See [`Sequence::skip`].
pub fn skip<I: IntoSequence>(iterable: I, count: usize) -> Skip<I::Sequence> {
    iterable.into_sequence().skip(count)
}

/// See [`Sequence::skip_while`].
pub fn skip_while<I, P>(iterable: I, predicate: P) -> SkipWhile<I::Sequence, P>
where
    I: IntoSequence,
    P: Fn(&I::Item) -> bool,
{
    iterable.into_sequence().skip_while(predicate)
}

/// See [`Sequence::every`].
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `step` is zero.
pub fn every<I: IntoSequence>(iterable: I, step: usize) -> Result<Every<I::Sequence>, Error> {
    iterable.into_sequence().every(step)
}

/// See [`Sequence::zip`].
pub fn zip<A, B>(primary: A, secondary: B) -> Zip<A::Sequence, B::Sequence>
where
    A: IntoSequence,
    B: IntoSequence,
{
    primary.into_sequence().zip(secondary)
}

/// See [`Sequence::packed_zip`].
pub fn packed_zip<A, B>(first: A, second: B) -> PackedZip<A::Sequence, B::Sequence>
where
    A: IntoSequence,
    B: IntoSequence,
{
    first.into_sequence().packed_zip(second)
}

/// See [`Sequence::concat`].
pub fn concat<A, B>(first: A, second: B) -> Concat<A::Sequence, B::Sequence>
where
    A: IntoSequence,
    B: IntoSequence<Item = A::Item>,
{
    first.into_sequence().concat(second)
}

/// See [`Sequence::enumerate`].
pub fn enumerate<I: IntoSequence>(iterable: I) -> Enumerate<I::Sequence> {
    iterable.into_sequence().enumerate()
}

/// See [`Sequence::foreach`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn foreach<I, F>(iterable: I, action: F) -> Result<(), Error>
where
    I: IntoSequence,
    F: FnMut(I::Item),
{
    iterable.into_sequence().foreach(action)
}

/// See [`Sequence::reduce`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn reduce<I, A, F>(iterable: I, initial: A, function: F) -> Result<A, Error>
where
    I: IntoSequence,
    F: FnMut(A, I::Item) -> A,
{
    iterable.into_sequence().reduce(initial, function)
}

/// See [`Sequence::any`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn any<I>(iterable: I) -> Result<bool, Error>
where
    I: IntoSequence,
    I::Item: Truthy,
{
    iterable.into_sequence().any()
}

/// See [`Sequence::all`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn all<I>(iterable: I) -> Result<bool, Error>
where
    I: IntoSequence,
    I::Item: Truthy,
{
    iterable.into_sequence().all()
}

/// See [`Sequence::count`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn count<I: IntoSequence>(iterable: I) -> Result<usize, Error> {
    iterable.into_sequence().count()
}

/// See [`Sequence::last`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn last<I: IntoSequence>(iterable: I) -> Result<Option<I::Item>, Error> {
    iterable.into_sequence().last()
}

/// See [`Sequence::to_array`].
///
/// # Errors
///
/// The first error returned by the pipeline.
pub fn to_array<I: IntoSequence>(iterable: I) -> Result<Vec<I::Item>, Error> {
    iterable.into_sequence().to_array()
}
