//! Combinators that change the values passing through.

use std::rc::Rc;

use super::{Kind, Latch, Sequence};
use crate::Error;

/// Applies a function to every value. See [`Sequence::map`].
pub struct Map<S, F> {
    upstream: S,
    function: Rc<F>,
    latch: Latch,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(upstream: S, function: F) -> Self {
        Self {
            upstream,
            function: Rc::new(function),
            latch: Latch::Open,
        }
    }
}

impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Result<Option<U>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = self.upstream.next()?.map(&*self.function);
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            function: Rc::clone(&self.function),
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Map
    }
}

/// Applies a fallible mapping that must produce a value for every element.
/// See [`Sequence::try_map`].
pub struct TryMap<S, F> {
    upstream: S,
    function: Rc<F>,
    /// Number of upstream values mapped so far.
    position: usize,
    latch: Latch,
}

impl<S, F> TryMap<S, F> {
    pub(crate) fn new(upstream: S, function: F) -> Self {
        Self {
            upstream,
            function: Rc::new(function),
            position: 0,
            latch: Latch::Open,
        }
    }
}

impl<S, F, U> Sequence for TryMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> Result<Option<U>, Error>,
{
    type Item = U;

    fn next(&mut self) -> Result<Option<U>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let pulled = self.upstream.next();
        if !matches!(pulled, Ok(None)) {
            self.position += 1;
        }
        let Some(value) = pulled? else {
            self.latch.close();
            return Ok(None);
        };
        match (self.function)(value)? {
            Some(mapped) => Ok(Some(mapped)),
            None => Err(Error::NoValueProduced {
                operation: "try_map",
                position: self.position,
            }),
        }
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            function: Rc::clone(&self.function),
            position: self.position,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Map
    }
}

/// Prefixes every value with its 1-based position. See [`Sequence::enumerate`].
#[derive(Debug)]
pub struct Enumerate<S> {
    upstream: S,
    position: usize,
    latch: Latch,
}

impl<S> Enumerate<S> {
    pub(crate) const fn new(upstream: S) -> Self {
        Self {
            upstream,
            position: 0,
            latch: Latch::Open,
        }
    }
}

impl<S: Sequence> Sequence for Enumerate<S> {
    type Item = (usize, S::Item);

    fn next(&mut self) -> Result<Option<Self::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let pulled = self.upstream.next();
        if !matches!(pulled, Ok(None)) {
            self.position += 1;
        }
        let item = pulled?.map(|value| (self.position, value));
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            position: self.position,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Enumerate
    }
}

#[cfg(test)]
mod tests {
    use super::super::{iterate, try_generate};
    use super::*;

    #[test]
    fn test_map_shares_function_with_clone() {
        let calls = std::cell::Cell::new(0);
        let mut original = iterate(vec![1, 2]).map(|value| {
            calls.set(calls.get() + 1);
            value
        });
        let copy = original.try_clone().unwrap();
        original.next().unwrap();
        copy.to_array().unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_try_map_reports_position_of_missing_value() {
        let mut sequence = iterate(vec![1, 2, 3]).try_map(|value| Ok((value != 2).then_some(value)));
        assert_eq!(sequence.next().unwrap(), Some(1));
        let error = sequence.next().unwrap_err();
        assert!(matches!(error, Error::NoValueProduced { position: 2, .. }));
    }

    #[test]
    fn test_enumerate_counts_a_failed_pull() {
        let producer = vec![Ok('a'), Err(Error::callback(std::fmt::Error)), Ok('c')];
        let mut pairs = try_generate(producer).enumerate();
        assert_eq!(pairs.next().unwrap(), Some((1, 'a')));
        assert!(pairs.next().is_err());
        assert_eq!(pairs.to_array().unwrap(), vec![(3, 'c')]);
    }

    #[test]
    fn test_enumerate_starts_at_one() {
        let pairs = iterate(vec!['a', 'b']).enumerate().to_array().unwrap();
        assert_eq!(pairs, vec![(1, 'a'), (2, 'b')]);
    }
}
