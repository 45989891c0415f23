//! # lazyseq
//!
//! Lazy, composable sequence pipelines for Rust.
//!
//! ## Overview
//!
//! Build pipelines over finite or infinite sequences without materializing
//! intermediate collections, and copy a pipeline mid-traversal when you need
//! to replay it:
//!
//! - **Sequences**: sources, combinators, cloning and terminal operations
//!   ([`sequence`])
//! - **Free functions**: the same operations in `function(iterable, ...)`
//!   form ([`functions`])
//! - **Function combinators**: `compose`, `bind`, `curry`, `constant`,
//!   `identity`, `flip` ([`compose`])
//! - **Lambdas**: a sandboxed compiler turning `"|x| x * 2"` into a callable
//!   (`lambda`)
//!
//! ## Feature Flags
//!
//! - `compose`: Function combinators
//! - `lambda`: The lambda compiler and its dynamic `Value` type
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let mut pipeline = counter()
//!     .filter(|value| value % 3 == 0)
//!     .map(|value| value * value)
//!     .take(4);
//! assert_eq!(pipeline.next().unwrap(), Some(9));
//!
//! let replay = pipeline.try_clone().unwrap();
//! assert_eq!(pipeline.to_array().unwrap(), vec![36, 81, 144]);
//! assert_eq!(replay.to_array().unwrap(), vec![36, 81, 144]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the sequence trait, its sources and the error type.
///
/// # Usage
///
/// ```rust
/// use lazyseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Error;

    pub use crate::sequence::{
        IntoSequence, Sequence, Truthy, counter, counter_from, generate, iterate, range,
        range_step, try_generate, try_unfold, unfold,
    };

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "lambda")]
    pub use crate::lambda::{Lambda, Value, lambda};
}

mod error;

pub use error::Error;

pub mod functions;
pub mod sequence;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "lambda")]
pub mod lambda;
