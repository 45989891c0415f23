//! Combinators over two upstream sequences.

use super::{Kind, Latch, Sequence};
use crate::Error;

/// Discards the values `sequence` owes. Each discarded pull counts, whether
/// or not it fails.
fn catch_up<S: Sequence>(sequence: &mut S, lagging: &mut usize) -> Result<(), Error> {
    while *lagging > 0 {
        *lagging -= 1;
        sequence.next()?;
    }
    Ok(())
}

/// Pairs values of a primary and a secondary sequence. See [`Sequence::zip`].
///
/// Ends when the primary ends. When the secondary ends first, the remaining
/// pairs carry `None` on the secondary side. A failed primary pull still
/// consumes one secondary value, so later pairs stay aligned.
#[derive(Debug)]
pub struct Zip<A, B> {
    primary: A,
    secondary: B,
    /// Secondary values owed for primary pulls that failed.
    lagging: usize,
    latch: Latch,
}

impl<A, B> Zip<A, B> {
    pub(crate) const fn new(primary: A, secondary: B) -> Self {
        Self {
            primary,
            secondary,
            lagging: 0,
            latch: Latch::Open,
        }
    }
}

impl<A: Sequence, B: Sequence> Sequence for Zip<A, B> {
    type Item = (A::Item, Option<B::Item>);

    fn next(&mut self) -> Result<Option<Self::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        catch_up(&mut self.secondary, &mut self.lagging)?;
        let first = match self.primary.next() {
            Ok(Some(first)) => first,
            Ok(None) => {
                self.latch.close();
                return Ok(None);
            }
            Err(error) => {
                self.lagging += 1;
                return Err(error);
            }
        };
        let second = self.secondary.next()?;
        Ok(Some((first, second)))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            primary: self.primary.try_clone()?,
            secondary: self.secondary.try_clone()?,
            lagging: self.lagging,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Zip
    }
}

/// Pairs values of two sequences, ending as soon as either ends. See
/// [`Sequence::packed_zip`].
#[derive(Debug)]
pub struct PackedZip<A, B> {
    first: A,
    second: B,
    /// Values of `second` owed for pulls of `first` that failed.
    lagging: usize,
    latch: Latch,
}

impl<A, B> PackedZip<A, B> {
    pub(crate) const fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            lagging: 0,
            latch: Latch::Open,
        }
    }
}

impl<A: Sequence, B: Sequence> Sequence for PackedZip<A, B> {
    type Item = (A::Item, B::Item);

    fn next(&mut self) -> Result<Option<Self::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        catch_up(&mut self.second, &mut self.lagging)?;
        let item = match self.first.next() {
            Ok(Some(first)) => self.second.next()?.map(|second| (first, second)),
            Ok(None) => None,
            Err(error) => {
                self.lagging += 1;
                return Err(error);
            }
        };
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            first: self.first.try_clone()?,
            second: self.second.try_clone()?,
            lagging: self.lagging,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::PackedZip
    }
}

/// Yields all of one sequence, then all of another. See [`Sequence::concat`].
#[derive(Debug)]
pub struct Concat<A, B> {
    first: A,
    second: B,
    latch: Latch,
}

impl<A, B> Concat<A, B> {
    pub(crate) const fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            latch: Latch::Open,
        }
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;

    fn next(&mut self) -> Result<Option<A::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        // `first` latches, so once it has ended this costs one flag check.
        let item = match self.first.next()? {
            Some(value) => Some(value),
            None => self.second.next()?,
        };
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            first: self.first.try_clone()?,
            second: self.second.try_clone()?,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Concat
    }
}

#[cfg(test)]
mod tests {
    use super::super::{counter, iterate, range, try_generate};
    use super::*;

    #[test]
    fn test_zip_keeps_going_after_secondary_ends() {
        let pairs = range(1, 3).zip(vec![10]).to_array().unwrap();
        assert_eq!(pairs, vec![(1, Some(10)), (2, None), (3, None)]);
    }

    #[test]
    fn test_zip_ends_with_primary_even_if_secondary_is_infinite() {
        let pairs = iterate(vec!['a', 'b']).zip(counter()).to_array().unwrap();
        assert_eq!(pairs, vec![('a', Some(1)), ('b', Some(2))]);
    }

    #[test]
    fn test_zip_stays_aligned_after_primary_error() {
        let producer = vec![Ok(1), Err(Error::callback(std::fmt::Error)), Ok(3)];
        let mut pairs = try_generate(producer).zip(vec!['a', 'b', 'c']);
        assert_eq!(pairs.next().unwrap(), Some((1, Some('a'))));
        assert!(pairs.next().is_err());
        assert_eq!(pairs.to_array().unwrap(), vec![(3, Some('c'))]);
    }

    #[test]
    fn test_zip_drops_primary_value_when_secondary_fails() {
        let secondary = vec![Ok('a'), Err(Error::callback(std::fmt::Error)), Ok('c')];
        let mut pairs = range(1, 3).zip(try_generate(secondary));
        assert_eq!(pairs.next().unwrap(), Some((1, Some('a'))));
        assert!(pairs.next().is_err());
        assert_eq!(pairs.to_array().unwrap(), vec![(3, Some('c'))]);
    }

    #[test]
    fn test_packed_zip_stays_aligned_after_error() {
        let producer = vec![Ok(1), Err(Error::callback(std::fmt::Error)), Ok(3)];
        let mut pairs = try_generate(producer).packed_zip(vec!['a', 'b', 'c', 'd']);
        assert_eq!(pairs.next().unwrap(), Some((1, 'a')));
        assert!(pairs.next().is_err());
        assert_eq!(pairs.to_array().unwrap(), vec![(3, 'c')]);
    }

    #[test]
    fn test_packed_zip_stops_at_shorter() {
        let pairs = counter().packed_zip(vec!['x', 'y']).to_array().unwrap();
        assert_eq!(pairs, vec![(1, 'x'), (2, 'y')]);
    }

    #[test]
    fn test_concat_of_empty_first() {
        let values = iterate(Vec::<i64>::new()).concat(range(1, 2)).to_array().unwrap();
        assert_eq!(values, vec![1, 2]);
    }
}
