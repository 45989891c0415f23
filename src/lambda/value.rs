//! The dynamic value type lambdas compute with.

use std::fmt;
use std::rc::Rc;

use crate::sequence::Truthy;

/// A dynamically typed value.
///
/// `Nil` stands for "no value": a lambda that reads a missing argument or an
/// out-of-range index gets `Nil`. Everything except `Nil` and `false` is
/// truthy.
///
/// Lists and strings are reference counted, so cloning a value is cheap.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// An immutable list.
    List(Rc<[Value]>),
}

impl Value {
    /// The name of the value's type, as used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Returns `true` for [`Value::Nil`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Converts `Nil` into `None` and anything else into `Some`.
    pub fn into_option(self) -> Option<Self> {
        if self.is_nil() { None } else { Some(self) }
    }

    /// Returns the integer, if this is one.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number as a float, if this is an integer or a float.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Reads the element at a 1-based `position` of a list.
    ///
    /// Returns `Nil` for non-lists and out-of-range positions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::lambda::Value;
    ///
    /// let pair = Value::from(vec![Value::from(1), Value::from("one")]);
    /// assert_eq!(pair.get(2), Value::from("one"));
    /// assert_eq!(pair.get(3), Value::Nil);
    /// ```
    pub fn get(&self, position: i64) -> Self {
        let Self::List(values) = self else {
            return Self::Nil;
        };
        usize::try_from(position)
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| values.get(index))
            .cloned()
            .unwrap_or_default()
    }

    /// Equality that treats integers and floats with the same value as equal.
    #[allow(clippy::float_cmp)]
    pub(crate) fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                match (self, other) {
                    (Self::Int(left), Self::Int(right)) => left == right,
                    _ => self.as_float() == other.as_float(),
                }
            }
            (Self::List(left), Self::List(right)) => {
                left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(left, right)| left.loosely_equals(right))
            }
            _ => self == other,
        }
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => formatter.write_str("nil"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Str(value) => formatter.write_str(value),
            Self::List(values) => {
                formatter.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    match value {
                        Self::Str(text) => write!(formatter, "{text:?}")?,
                        other => write!(formatter, "{other}")?,
                    }
                }
                formatter.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::List(Rc::from(values))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterable: I) -> Self {
        Self::List(iterable.into_iter().collect())
    }
}
