//! Error type shared by every sequence, combinator and lambda.
//!
//! Errors fall into four groups:
//!
//! - **Construction errors** ([`Error::InvalidArgument`]) are returned by the
//!   constructor call itself, before any value is pulled.
//! - **Protocol violations** ([`Error::NoValueProduced`]) are returned from
//!   `next()` at the element that caused them.
//! - **Clone refusals** ([`Error::NotClonable`]) are returned from
//!   `try_clone()` when the pipeline contains a source whose state lives
//!   outside the pipeline.
//! - **Caller errors** ([`Error::Callback`], [`Error::Lambda`]) come from
//!   user-supplied callbacks, generators or lambdas and are passed through
//!   without being wrapped again.

use crate::sequence::Kind;

#[cfg(feature = "lambda")]
use crate::lambda::LambdaError;

/// Errors produced while building, traversing or cloning a sequence.
///
/// # Examples
///
/// ```rust
/// use lazyseq::{Error, sequence::{Sequence, generate}};
///
/// let error = generate(vec![1, 2, 3]).try_clone().unwrap_err();
/// assert!(matches!(error, Error::NotClonable { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A combinator or source was constructed with an argument it cannot accept.
    #[error("{operation}: {reason}")]
    InvalidArgument {
        /// The constructor that rejected the argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: &'static str,
    },

    /// A mapping produced no value for an element.
    ///
    /// "No value" is reserved for the end of a sequence, so a mapping that
    /// produces nothing would be indistinguishable from exhaustion.
    #[error(
        "{operation}: mapping produced no value for element {position}; \
         a mapping must produce a value for every element"
    )]
    NoValueProduced {
        /// The combinator whose mapping produced nothing.
        operation: &'static str,
        /// 1-based position of the offending element in the upstream sequence.
        position: usize,
    },

    /// The pipeline contains a source that cannot be replayed.
    #[error(
        "cannot clone a sequence backed by a {kind} source: its state lives outside \
         the pipeline; collect it into a Vec with `to_array` and `iterate` over that instead"
    )]
    NotClonable {
        /// The non-clonable source kind.
        kind: Kind,
    },

    /// A lambda failed to compile or to evaluate.
    #[cfg(feature = "lambda")]
    #[error(transparent)]
    Lambda(#[from] LambdaError),

    /// An error raised by caller-supplied code.
    #[error(transparent)]
    Callback(Box<dyn std::error::Error + 'static>),
}

impl Error {
    /// Wraps a caller's own error so it can travel through a pipeline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::Error;
    ///
    /// let error = Error::callback(std::fmt::Error);
    /// assert_eq!(error.to_string(), "an error occurred when formatting an argument");
    /// ```
    pub fn callback<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::Callback(Box::new(error))
    }

    pub(crate) const fn invalid_argument(operation: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { operation, reason }
    }

    pub(crate) fn not_clonable(kind: Kind) -> Self {
        log::debug!("refusing to clone a pipeline backed by a {kind} source");
        Self::NotClonable { kind }
    }
}
