//! Errors raised while compiling or evaluating a lambda.

/// A lambda failed to compile or to evaluate.
///
/// Compile-time variants carry the byte offset into the lambda's source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LambdaError {
    /// The source is not a well-formed lambda.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax {
        /// Byte offset of the offending token.
        offset: usize,
        /// What was expected or found.
        message: String,
    },

    /// The body refers to something other than a parameter or builtin.
    #[error("unknown name `{name}` at offset {offset}: a lambda may only refer to its parameters")]
    UnknownName {
        /// The unresolved name.
        name: String,
        /// Byte offset of the name.
        offset: usize,
    },

    /// Two parameters share a name.
    #[error("parameter `{name}` is declared twice")]
    DuplicateParameter {
        /// The repeated name.
        name: String,
    },

    /// A builtin was called with the wrong number of arguments.
    #[error("`{function}` expects {expected} but was given {actual}")]
    Arity {
        /// The builtin's name.
        function: &'static str,
        /// Human-readable description of the accepted argument count.
        expected: &'static str,
        /// Number of arguments given.
        actual: usize,
    },

    /// A binary operator was applied to operands it does not support.
    #[error("cannot apply `{operator}` to {left} and {right}")]
    OperandTypes {
        /// The operator.
        operator: &'static str,
        /// Type of the left operand.
        left: &'static str,
        /// Type of the right operand.
        right: &'static str,
    },

    /// A unary operator or builtin was applied to an operand it does not support.
    #[error("cannot apply `{operator}` to {operand}")]
    OperandType {
        /// The operator or builtin.
        operator: &'static str,
        /// Type of the operand.
        operand: &'static str,
    },

    /// Integer arithmetic overflowed.
    #[error("integer overflow in `{operator}`")]
    Overflow {
        /// The operator that overflowed.
        operator: &'static str,
    },

    /// Integer division or modulo by zero.
    #[error("integer division by zero in `{operator}`")]
    DivisionByZero {
        /// `//` or `%`.
        operator: &'static str,
    },
}

impl LambdaError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            message: message.into(),
        }
    }
}
