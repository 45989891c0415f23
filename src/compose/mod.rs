//! Function combinators.
//!
//! Small building blocks for assembling the predicates and mappings that
//! sequence combinators take:
//!
//! - [`identity`]: returns its argument unchanged (I combinator)
//! - [`constant`]: ignores its argument and returns a fixed value (K combinator)
//! - [`flip`]: swaps the arguments of a binary function (C combinator)
//! - [`compose`]: right-to-left composition, `compose(f, g)(x) = f(g(x))`
//! - [`bind`]: fixes the first argument of a binary function
//! - [`curry`]: turns a binary function into a chain of unary ones
//!
//! The macros [`compose!`](crate::compose!), [`partial!`](crate::partial!)
//! and [`curry2!`](crate::curry2!) are variadic or unboxed forms of the same
//! operations.
//!
//! # Examples
//!
//! ```
//! use lazyseq::compose::{bind, compose};
//! use lazyseq::sequence::{Sequence, iterate};
//!
//! fn multiply(first: i32, second: i32) -> i32 { first * second }
//!
//! let triple_then_increment = compose(|value: i32| value + 1, bind(multiply, 3));
//! let values = iterate(vec![1, 2, 3]).map(triple_then_increment).to_array().unwrap();
//! assert_eq!(values, vec![4, 7, 10]);
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `compose(f, compose(g, h)) == compose(compose(f, g), h)`
//! - **Identity**: `compose(identity, f) == f == compose(f, identity)`
//! - **Double Flip Identity**: `flip(flip(f)) == f`
//! - **Currying**: `curry(f)(a)(b) == bind(f, a)(b) == f(a, b)`

mod macros;
mod utils;

pub use utils::{bind, compose, constant, curry, flip, identity};
