//! Sources: sequences with no upstream.
//!
//! - [`Array`]: a snapshot of a finite collection ([`iterate`]).
//! - [`Range`]: integer ranges and counters ([`range`], [`range_step`],
//!   [`counter`], [`counter_from`]).
//! - [`Generator`]: any external [`Iterator`] driven one value per pull
//!   ([`generate`], [`try_generate`]).
//! - [`Callback`]: the stateless-iterator shape, a function called with an
//!   invariant state and the previous cursor ([`unfold`], [`try_unfold`]).
//!
//! Generators and callbacks keep state the pipeline cannot see, so they and
//! every pipeline built on them refuse [`Sequence::try_clone`].

use std::fmt;
use std::rc::Rc;

use super::{Kind, Latch, Sequence};
use crate::Error;

// =============================================================================
// Array
// =============================================================================

/// A sequence over a snapshot of a finite collection.
///
/// Created by [`iterate`]. The snapshot is shared between clones; each clone
/// only copies the cursor.
#[derive(Clone)]
pub struct Array<T> {
    items: Rc<[T]>,
    cursor: usize,
    latch: Latch,
}

/// Iterates over a snapshot of `items`.
///
/// Borrowed slices are copied, so mutating the original collection later
/// does not affect the sequence.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::{Sequence, iterate};
///
/// let mut source = vec![1, 2, 3];
/// let sequence = iterate(source.as_slice());
/// source.push(4);
/// assert_eq!(sequence.to_array().unwrap(), vec![1, 2, 3]);
/// ```
pub fn iterate<T: Clone>(items: impl Into<Rc<[T]>>) -> Array<T> {
    Array {
        items: items.into(),
        cursor: 0,
        latch: Latch::Open,
    }
}

impl<T> Array<T> {
    /// Number of values not yet produced.
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.cursor)
    }
}

impl<T: Clone> Sequence for Array<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = self.items.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(self.clone())
    }

    fn kind(&self) -> Kind {
        Kind::Array
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Array")
            .field("items", &self.items)
            .field("cursor", &self.cursor)
            .field("complete", &self.latch.is_closed())
            .finish()
    }
}

// =============================================================================
// Range
// =============================================================================

/// An integer range, or an unbounded counter when it has no stop.
#[derive(Clone, Debug)]
pub struct Range {
    /// `None` once stepping past `current` would overflow.
    current: Option<i64>,
    stop: Option<i64>,
    step: i64,
    latch: Latch,
}

/// Counts from `start` up to and including `stop` in steps of one.
///
/// Empty when `start > stop`.
pub const fn range(start: i64, stop: i64) -> Range {
    Range {
        current: Some(start),
        stop: Some(stop),
        step: 1,
        latch: Latch::Open,
    }
}

/// Counts from `start` towards `stop` in steps of `step`.
///
/// A positive step stops once the value passes above `stop`, a negative one
/// once it passes below.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `step` is zero.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::{Sequence, range_step};
///
/// assert_eq!(range_step(1, 10, 2).unwrap().to_array().unwrap(), vec![1, 3, 5, 7, 9]);
/// assert_eq!(range_step(10, 1, -3).unwrap().to_array().unwrap(), vec![10, 7, 4, 1]);
/// assert!(range_step(1, 10, 0).is_err());
/// ```
pub fn range_step(start: i64, stop: i64, step: i64) -> Result<Range, Error> {
    if step == 0 {
        return Err(Error::invalid_argument("range", "step must not be zero"));
    }
    Ok(Range {
        current: Some(start),
        stop: Some(stop),
        step,
        latch: Latch::Open,
    })
}

/// Counts 1, 2, 3, ... without end.
pub const fn counter() -> Range {
    Range {
        current: Some(1),
        stop: None,
        step: 1,
        latch: Latch::Open,
    }
}

/// Counts from `start` in steps of `step` without end.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `step` is zero.
pub fn counter_from(start: i64, step: i64) -> Result<Range, Error> {
    if step == 0 {
        return Err(Error::invalid_argument("counter", "step must not be zero"));
    }
    Ok(Range {
        current: Some(start),
        stop: None,
        step,
        latch: Latch::Open,
    })
}

impl Range {
    const fn in_bounds(&self, value: i64) -> bool {
        match self.stop {
            None => true,
            Some(stop) if self.step > 0 => value <= stop,
            Some(stop) => value >= stop,
        }
    }
}

impl Sequence for Range {
    type Item = i64;

    fn next(&mut self) -> Result<Option<i64>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = self.current.filter(|value| self.in_bounds(*value));
        if let Some(value) = item {
            self.current = value.checked_add(self.step);
        }
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(self.clone())
    }

    fn kind(&self) -> Kind {
        if self.stop.is_some() {
            Kind::Range
        } else {
            Kind::Counter
        }
    }
}

// =============================================================================
// Generator
// =============================================================================

/// A sequence driving an external producer one value per pull.
///
/// The producer is an ordinary [`Iterator`] of `Result`s; errors are passed
/// through unchanged. Once it yields `None` it is never resumed. Cannot be
/// cloned.
pub struct Generator<I> {
    producer: I,
    latch: Latch,
}

/// Wraps an infallible external producer.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::{Sequence, generate};
///
/// let squares = generate((1..).map(|value: i64| value * value));
/// assert_eq!(squares.take(3).to_array().unwrap(), vec![1, 4, 9]);
/// ```
pub fn generate<I>(producer: I) -> Generator<impl Iterator<Item = Result<I::Item, Error>>>
where
    I: IntoIterator,
{
    try_generate(producer.into_iter().map(Ok))
}

/// Wraps an external producer that may fail.
pub fn try_generate<I, T>(producer: I) -> Generator<I::IntoIter>
where
    I: IntoIterator<Item = Result<T, Error>>,
{
    Generator {
        producer: producer.into_iter(),
        latch: Latch::Open,
    }
}

impl<I, T> Sequence for Generator<I>
where
    I: Iterator<Item = Result<T, Error>>,
{
    type Item = T;

    fn next(&mut self) -> Result<Option<T>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = self.producer.next().transpose()?;
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Err(Error::not_clonable(Kind::Generator))
    }

    fn kind(&self) -> Kind {
        Kind::Generator
    }
}

impl<I> fmt::Debug for Generator<I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Generator")
            .field("complete", &self.latch.is_closed())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Callback
// =============================================================================

/// A sequence that repeatedly calls a function with an invariant state and
/// the previous cursor.
///
/// Each call returns the next cursor, which is also the value produced;
/// returning `None` ends the sequence. Cannot be cloned, since the function
/// may carry hidden state.
pub struct Callback<S, C, F> {
    state: S,
    cursor: C,
    function: F,
    latch: Latch,
}

/// Builds a callback sequence from an infallible step function.
///
/// The initial `cursor` is passed to the first call but is not produced
/// itself.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::{Sequence, unfold};
///
/// let names = vec!["a", "b", "c"];
/// let indices = unfold(names, 0_usize, |names, index| {
///     (*index < names.len()).then_some(index + 1)
/// });
/// assert_eq!(indices.to_array().unwrap(), vec![1, 2, 3]);
/// ```
pub fn unfold<S, C, F>(
    state: S,
    cursor: C,
    mut function: F,
) -> Callback<S, C, impl FnMut(&S, &C) -> Result<Option<C>, Error>>
where
    C: Clone,
    F: FnMut(&S, &C) -> Option<C>,
{
    try_unfold(state, cursor, move |state: &S, cursor: &C| Ok(function(state, cursor)))
}

/// Builds a callback sequence from a step function that may fail.
pub const fn try_unfold<S, C, F>(state: S, cursor: C, function: F) -> Callback<S, C, F>
where
    C: Clone,
    F: FnMut(&S, &C) -> Result<Option<C>, Error>,
{
    Callback {
        state,
        cursor,
        function,
        latch: Latch::Open,
    }
}

impl<S, C, F> Sequence for Callback<S, C, F>
where
    C: Clone,
    F: FnMut(&S, &C) -> Result<Option<C>, Error>,
{
    type Item = C;

    fn next(&mut self) -> Result<Option<C>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = (self.function)(&self.state, &self.cursor)?;
        if let Some(cursor) = &item {
            self.cursor = cursor.clone();
        }
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Err(Error::not_clonable(Kind::Callback))
    }

    fn kind(&self) -> Kind {
        Kind::Callback
    }
}

impl<S, C: fmt::Debug, F> fmt::Debug for Callback<S, C, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Callback")
            .field("cursor", &self.cursor)
            .field("complete", &self.latch.is_closed())
            .finish_non_exhaustive()
    }
}
