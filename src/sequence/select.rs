//! Combinators that decide which upstream values pass through.

use std::collections::VecDeque;
use std::rc::Rc;

use super::{Kind, Latch, Sequence};
use crate::Error;

// =============================================================================
// Filter
// =============================================================================

/// Keeps the values for which a predicate holds. See [`Sequence::filter`].
pub struct Filter<S, P> {
    upstream: S,
    predicate: Rc<P>,
    latch: Latch,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate: Rc::new(predicate),
            latch: Latch::Open,
        }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = loop {
            match self.upstream.next()? {
                Some(value) if !(self.predicate)(&value) => {}
                other => break other,
            }
        };
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            predicate: Rc::clone(&self.predicate),
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Filter
    }
}

/// Keeps the values for which a fallible predicate holds. See
/// [`Sequence::try_filter`].
pub struct TryFilter<S, P> {
    upstream: S,
    predicate: Rc<P>,
    latch: Latch,
}

impl<S, P> TryFilter<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate: Rc::new(predicate),
            latch: Latch::Open,
        }
    }
}

impl<S, P> Sequence for TryFilter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> Result<bool, Error>,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        let item = loop {
            match self.upstream.next()? {
                Some(value) => {
                    if (self.predicate)(&value)? {
                        break Some(value);
                    }
                }
                None => break None,
            }
        };
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            predicate: Rc::clone(&self.predicate),
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Filter
    }
}

// =============================================================================
// Take
// =============================================================================

/// Yields at most a fixed number of values. See [`Sequence::take`].
#[derive(Debug)]
pub struct Take<S> {
    upstream: S,
    remaining: usize,
    latch: Latch,
}

impl<S> Take<S> {
    pub(crate) const fn new(upstream: S, count: usize) -> Self {
        Self {
            upstream,
            remaining: count,
            latch: Latch::Open,
        }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        if self.remaining == 0 {
            self.latch.close();
            return Ok(None);
        }
        let pulled = self.upstream.next();
        if !matches!(pulled, Ok(None)) {
            self.remaining -= 1;
        }
        Ok(self.latch.observe(pulled?))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            remaining: self.remaining,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Take
    }
}

/// Yields values while a predicate holds, including the first failing one.
/// See [`Sequence::take_while`].
pub struct TakeWhile<S, P> {
    upstream: S,
    predicate: Rc<P>,
    /// Set once a value failed the predicate; the next pull ends the sequence.
    failed: bool,
    latch: Latch,
}

impl<S, P> TakeWhile<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate: Rc::new(predicate),
            failed: false,
            latch: Latch::Open,
        }
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        if self.failed {
            self.latch.close();
            return Ok(None);
        }
        let item = self.upstream.next()?;
        if let Some(value) = &item {
            self.failed = !(self.predicate)(value);
        }
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            predicate: Rc::clone(&self.predicate),
            failed: self.failed,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::TakeWhile
    }
}

/// Yields the final values of its upstream. See [`Sequence::take_last`].
pub struct TakeLast<S: Sequence> {
    upstream: S,
    count: usize,
    /// The last `count` upstream values pulled so far.
    window: VecDeque<S::Item>,
    /// Set once the upstream has ended and `window` is final.
    drained: bool,
    latch: Latch,
}

impl<S: Sequence> TakeLast<S> {
    pub(crate) const fn new(upstream: S, count: usize) -> Self {
        Self {
            upstream,
            count,
            window: VecDeque::new(),
            drained: false,
            latch: Latch::Open,
        }
    }

    /// Pulls the upstream to its end. An error leaves the partial window in
    /// place so the next call resumes where this one stopped.
    fn drain(&mut self) -> Result<(), Error> {
        let mut pulled = 0_usize;
        while let Some(value) = self.upstream.next()? {
            pulled += 1;
            if self.count == 0 {
                continue;
            }
            if self.window.len() == self.count {
                self.window.pop_front();
            }
            self.window.push_back(value);
        }
        self.drained = true;
        log::trace!("take_last drained {pulled} values into a window of {}", self.count);
        Ok(())
    }
}

impl<S> Sequence for TakeLast<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        if !self.drained {
            self.drain()?;
        }
        let item = self.window.pop_front();
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            count: self.count,
            window: self.window.clone(),
            drained: self.drained,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::TakeLast
    }
}

// =============================================================================
// Skip
// =============================================================================

/// Discards a fixed number of leading values. See [`Sequence::skip`].
#[derive(Debug)]
pub struct Skip<S> {
    upstream: S,
    pending: usize,
    latch: Latch,
}

impl<S> Skip<S> {
    pub(crate) const fn new(upstream: S, count: usize) -> Self {
        Self {
            upstream,
            pending: count,
            latch: Latch::Open,
        }
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        while self.pending > 0 {
            let pulled = self.upstream.next();
            if matches!(pulled, Ok(None)) {
                self.latch.close();
                return Ok(None);
            }
            self.pending -= 1;
            pulled?;
        }
        let item = self.upstream.next()?;
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            pending: self.pending,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Skip
    }
}

/// Discards values while a predicate holds. See [`Sequence::skip_while`].
pub struct SkipWhile<S, P> {
    upstream: S,
    predicate: Rc<P>,
    /// Set once a value failed the predicate; later values are not tested.
    passing: bool,
    latch: Latch,
}

impl<S, P> SkipWhile<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate: Rc::new(predicate),
            passing: false,
            latch: Latch::Open,
        }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        if self.passing {
            let item = self.upstream.next()?;
            return Ok(self.latch.observe(item));
        }
        let item = loop {
            match self.upstream.next()? {
                Some(value) if (self.predicate)(&value) => {}
                other => break other,
            }
        };
        self.passing = true;
        Ok(self.latch.observe(item))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            predicate: Rc::clone(&self.predicate),
            passing: self.passing,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::SkipWhile
    }
}

// =============================================================================
// Every
// =============================================================================

/// Yields the first value and every `step`-th value after it. See
/// [`Sequence::every`].
#[derive(Debug)]
pub struct Every<S> {
    upstream: S,
    step: usize,
    /// Values still to discard before the next one is yielded.
    pending_skips: usize,
    latch: Latch,
}

impl<S> Every<S> {
    pub(crate) fn new(upstream: S, step: usize) -> Result<Self, Error> {
        if step == 0 {
            return Err(Error::invalid_argument("every", "step must be at least 1"));
        }
        Ok(Self {
            upstream,
            step,
            pending_skips: 0,
            latch: Latch::Open,
        })
    }
}

impl<S: Sequence> Sequence for Every<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>, Error> {
        if self.latch.is_closed() {
            return Ok(None);
        }
        while self.pending_skips > 0 {
            let pulled = self.upstream.next();
            if matches!(pulled, Ok(None)) {
                self.latch.close();
                return Ok(None);
            }
            self.pending_skips -= 1;
            pulled?;
        }
        let pulled = self.upstream.next();
        if !matches!(pulled, Ok(None)) {
            self.pending_skips = self.step - 1;
        }
        Ok(self.latch.observe(pulled?))
    }

    fn is_complete(&self) -> bool {
        self.latch.is_closed()
    }

    fn try_clone(&self) -> Result<Self, Error> {
        Ok(Self {
            upstream: self.upstream.try_clone()?,
            step: self.step,
            pending_skips: self.pending_skips,
            latch: self.latch,
        })
    }

    fn kind(&self) -> Kind {
        Kind::Every
    }
}
