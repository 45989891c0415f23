//! A sandboxed compiler for short lambda expressions.
//!
//! [`lambda`] turns source text such as `"|x, y| x * y + 1"` into a
//! [`Lambda`] that can be called any number of times. The body may only use
//! its own parameters, literals, operators and a fixed set of pure builtins,
//! so a compiled lambda has no way to reach outside its arguments and always
//! terminates. Bodies nesting deeper than 256 levels are rejected at compile
//! time.
//!
//! # Syntax
//!
//! | Construct | Forms |
//! |-----------|-------|
//! | Header | `\|a, b\| body`, `\|\| body` |
//! | Literals | `1`, `2.5`, `1e3`, `'text'`, `"text"`, `true`, `false`, `nil`, `[1, 2]` |
//! | Logic | `and` / `&&`, `or` / `\|\|`, `not` / `!` |
//! | Comparison | `==`, `!=` / `~=`, `<`, `<=`, `>`, `>=` |
//! | Arithmetic | `+`, `-`, `*`, `/`, `//`, `%`, `^` |
//! | Concatenation | `..` |
//! | Indexing | `list[1]` (1-based) |
//! | Builtins | `len`, `abs`, `min`, `max`, `floor`, `str` |
//!
//! `and` and `or` short-circuit and return one of their operands. Integer
//! arithmetic is checked, `/` always produces a float, `//` rounds down and
//! `%` takes the sign of the divisor.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::lambda::{Value, lambda};
//! use lazyseq::sequence::{Sequence, iterate};
//!
//! let is_even = lambda("|x| x % 2 == 0").unwrap();
//! let square = lambda("|x| x * x").unwrap();
//! let add = lambda("|total, x| total + x").unwrap();
//!
//! let values: Vec<Value> = (1..=6).map(Value::from).collect();
//! let total = iterate(values)
//!     .try_filter(is_even.predicate())
//!     .try_map(square.mapper())
//!     .try_reduce(Value::from(0), add.reducer())
//!     .unwrap();
//! assert_eq!(total, Value::from(56));
//! ```

mod error;
mod eval;
mod lexer;
mod parser;
mod value;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

pub use error::LambdaError;
pub use value::Value;

use crate::Error;
use crate::sequence::Truthy;
use parser::Expression;

/// A compiled lambda.
///
/// Cloning is cheap: clones share the compiled body.
#[derive(Clone)]
pub struct Lambda {
    source: Rc<str>,
    parameters: Rc<[String]>,
    body: Rc<Expression>,
}

/// Compiles `source` into a [`Lambda`].
///
/// # Errors
///
/// [`Error::Lambda`] when the source is malformed, refers to an unknown
/// name, repeats a parameter or calls a builtin with the wrong number of
/// arguments.
///
/// # Examples
///
/// ```rust
/// use lazyseq::lambda::{Value, lambda};
///
/// let describe = lambda("|name, count| name .. ': ' .. str(count)").unwrap();
/// assert_eq!(
///     describe.call(&[Value::from("apples"), Value::from(3)]).unwrap(),
///     Value::from("apples: 3"),
/// );
///
/// assert!(lambda("|x| y").is_err());
/// ```
pub fn lambda(source: &str) -> Result<Lambda, Error> {
    let tokens = lexer::tokenize(source)?;
    let parsed = parser::parse(&tokens)?;
    Ok(Lambda {
        source: Rc::from(source),
        parameters: parsed.parameters.into_iter().collect(),
        body: Rc::new(parsed.body),
    })
}

impl Lambda {
    /// The text the lambda was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The declared parameter names, in order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Evaluates the body with `arguments` bound to the parameters.
    ///
    /// Missing arguments read as [`Value::Nil`]; extra ones are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Lambda`] when evaluation fails, for example on an operand
    /// type mismatch, integer overflow or integer division by zero.
    pub fn call(&self, arguments: &[Value]) -> Result<Value, Error> {
        Ok(eval::evaluate(&self.body, arguments)?)
    }

    /// Calls the lambda with a single argument.
    ///
    /// # Errors
    ///
    /// See [`Lambda::call`].
    pub fn call1(&self, argument: Value) -> Result<Value, Error> {
        self.call(&[argument])
    }

    /// Adapts the lambda into a predicate for [`Sequence::try_filter`].
    ///
    /// The result is tested for truthiness.
    ///
    /// [`Sequence::try_filter`]: crate::sequence::Sequence::try_filter
    #[must_use]
    pub fn predicate(&self) -> impl Fn(&Value) -> Result<bool, Error> + use<> {
        let lambda = self.clone();
        move |value: &Value| {
            lambda
                .call(std::slice::from_ref(value))
                .map(|result| result.is_truthy())
        }
    }

    /// Adapts the lambda into a mapping for [`Sequence::try_map`].
    ///
    /// A `nil` result becomes `None`, which `try_map` reports as
    /// [`Error::NoValueProduced`].
    ///
    /// [`Sequence::try_map`]: crate::sequence::Sequence::try_map
    #[must_use]
    pub fn mapper(&self) -> impl Fn(Value) -> Result<Option<Value>, Error> + use<> {
        let lambda = self.clone();
        move |value: Value| lambda.call1(value).map(Value::into_option)
    }

    /// Adapts a two-parameter lambda into a reducer for
    /// [`Sequence::try_reduce`], called as `(accumulator, value)`.
    ///
    /// [`Sequence::try_reduce`]: crate::sequence::Sequence::try_reduce
    #[must_use]
    pub fn reducer(&self) -> impl Fn(Value, Value) -> Result<Value, Error> + use<> {
        let lambda = self.clone();
        move |accumulator: Value, value: Value| lambda.call(&[accumulator, value])
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Lambda")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.source)
    }
}

impl FromStr for Lambda {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        lambda(source)
    }
}
