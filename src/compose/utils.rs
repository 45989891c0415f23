//! Helper functions (combinators) for building callbacks.
//!
//! These functions serve as building blocks for the predicates, mappings and
//! reducers passed to sequence combinators.

use std::rc::Rc;

/// Returns the value unchanged.
///
/// The identity function is the unit element of composition:
/// `compose(identity, f)` and `compose(f, identity)` both behave like `f`.
///
/// In combinatory logic, this is known as the I combinator.
///
/// # Examples
///
/// ```
/// use lazyseq::compose::identity;
/// use lazyseq::sequence::{Sequence, iterate};
///
/// assert_eq!(identity(42), 42);
/// let values = iterate(vec![1, 2, 3]).map(identity).to_array().unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Creates a function that always returns the given value, ignoring its input.
///
/// Also known as the K combinator in combinatory logic.
///
/// # Examples
///
/// ```
/// use lazyseq::compose::constant;
/// use lazyseq::sequence::{Sequence, range};
///
/// // Replace all elements with zeros
/// let values = range(1, 3).map(constant(0)).to_array().unwrap();
/// assert_eq!(values, vec![0, 0, 0]);
/// ```
#[inline]
pub fn constant<T: Clone, U>(value: T) -> impl Fn(U) -> T {
    move |_| value.clone()
}

/// Swaps the arguments of a binary function.
///
/// Given a function `f(a, b)`, returns a new function `g(b, a)` such that
/// `g(b, a) = f(a, b)`. Also known as the C combinator.
///
/// # Laws
///
/// - **Double flip identity**: `flip(flip(f)) == f`
/// - **Flip definition**: `flip(f)(a, b) == f(b, a)`
///
/// # Examples
///
/// ```
/// use lazyseq::compose::flip;
///
/// fn subtract(minuend: i32, subtrahend: i32) -> i32 {
///     minuend - subtrahend
/// }
///
/// let flipped = flip(subtract);
/// assert_eq!(flipped(3, 10), 7);
/// ```
#[inline]
pub fn flip<A, B, C, F>(function: F) -> impl Fn(B, A) -> C
where
    F: Fn(A, B) -> C,
{
    move |second_argument, first_argument| function(first_argument, second_argument)
}

/// Composes two functions right to left: `compose(f, g)(x) = f(g(x))`.
///
/// # Examples
///
/// ```
/// use lazyseq::compose::compose;
///
/// fn add_one(x: i32) -> i32 { x + 1 }
/// fn double(x: i32) -> i32 { x * 2 }
///
/// let composed = compose(add_one, double);
/// assert_eq!(composed(5), 11);
/// ```
#[inline]
pub fn compose<A, B, C, F, G>(outer: F, inner: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |value| outer(inner(value))
}

/// Fixes the first argument of a binary function.
///
/// The bound argument is cloned on every call.
///
/// # Examples
///
/// ```
/// use lazyseq::compose::bind;
///
/// fn add(first: i32, second: i32) -> i32 { first + second }
///
/// let add_five = bind(add, 5);
/// assert_eq!(add_five(3), 8);
/// ```
#[inline]
pub fn bind<A, B, C, F>(function: F, first: A) -> impl Fn(B) -> C
where
    A: Clone,
    F: Fn(A, B) -> C,
{
    move |second| function(first.clone(), second)
}

/// Converts a binary function into curried form: `curry(f)(a)(b) = f(a, b)`.
///
/// Every partially applied function shares the original through an `Rc`.
///
/// # Examples
///
/// ```
/// use lazyseq::compose::curry;
///
/// fn add(first: i32, second: i32) -> i32 { first + second }
///
/// let curried_add = curry(add);
/// let add_five = curried_add(5);
/// assert_eq!(add_five(3), 8);
/// assert_eq!(curried_add(1)(1), 2);
/// ```
pub fn curry<A, B, C, F>(function: F) -> impl Fn(A) -> Box<dyn Fn(B) -> C>
where
    A: Clone + 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    let function = Rc::new(function);
    move |first| {
        let function = Rc::clone(&function);
        Box::new(move |second| function(first.clone(), second))
    }
}
