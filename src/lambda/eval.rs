//! Evaluates a compiled lambda body against its arguments.

use std::cmp::Ordering;

use super::LambdaError;
use super::parser::{BinaryOperator, Builtin, Expression, UnaryOperator};
use super::value::Value;
use crate::sequence::Truthy;

/// Evaluates `expression`. Parameters past the end of `arguments` read as `Nil`.
pub(crate) fn evaluate(expression: &Expression, arguments: &[Value]) -> Result<Value, LambdaError> {
    match expression {
        Expression::Literal(value) => Ok(value.clone()),
        Expression::Parameter(index) => Ok(arguments.get(*index).cloned().unwrap_or_default()),
        Expression::List(elements) => elements
            .iter()
            .map(|element| evaluate(element, arguments))
            .collect(),
        Expression::Unary(operator, operand) => unary(*operator, evaluate(operand, arguments)?),
        Expression::Binary(operator, left, right) => binary(
            *operator,
            &evaluate(left, arguments)?,
            &evaluate(right, arguments)?,
        ),
        Expression::And(left, right) => {
            let left = evaluate(left, arguments)?;
            if left.is_truthy() {
                evaluate(right, arguments)
            } else {
                Ok(left)
            }
        }
        Expression::Or(left, right) => {
            let left = evaluate(left, arguments)?;
            if left.is_truthy() {
                Ok(left)
            } else {
                evaluate(right, arguments)
            }
        }
        Expression::Index(target, position) => {
            index(&evaluate(target, arguments)?, &evaluate(position, arguments)?)
        }
        Expression::Call(builtin, parameters) => {
            let values = parameters
                .iter()
                .map(|parameter| evaluate(parameter, arguments))
                .collect::<Result<Vec<_>, _>>()?;
            call(*builtin, values)
        }
    }
}

fn unary(operator: UnaryOperator, operand: Value) -> Result<Value, LambdaError> {
    match (operator, operand) {
        (UnaryOperator::Not, operand) => Ok(Value::Bool(!operand.is_truthy())),
        (UnaryOperator::Negate, Value::Int(value)) => value
            .checked_neg()
            .map(Value::Int)
            .ok_or(LambdaError::Overflow { operator: "-" }),
        (UnaryOperator::Negate, Value::Float(value)) => Ok(Value::Float(-value)),
        (UnaryOperator::Negate, operand) => Err(LambdaError::OperandType {
            operator: "-",
            operand: operand.type_name(),
        }),
    }
}

fn mismatch(operator: BinaryOperator, left: &Value, right: &Value) -> LambdaError {
    LambdaError::OperandTypes {
        operator: operator.symbol(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn binary(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value, LambdaError> {
    use BinaryOperator as Op;

    match operator {
        Op::Add => arithmetic(operator, left, right, i64::checked_add, |l, r| l + r),
        Op::Subtract => arithmetic(operator, left, right, i64::checked_sub, |l, r| l - r),
        Op::Multiply => arithmetic(operator, left, right, i64::checked_mul, |l, r| l * r),
        Op::Divide => match (left.as_float(), right.as_float()) {
            (Some(l), Some(r)) => Ok(Value::Float(l / r)),
            _ => Err(mismatch(operator, left, right)),
        },
        Op::FloorDivide => match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(LambdaError::DivisionByZero { operator: "//" }),
            (Value::Int(l), Value::Int(r)) => floor_divide(*l, *r)
                .map(Value::Int)
                .ok_or(LambdaError::Overflow { operator: "//" }),
            _ => match (left.as_float(), right.as_float()) {
                (Some(l), Some(r)) => Ok(Value::Float((l / r).floor())),
                _ => Err(mismatch(operator, left, right)),
            },
        },
        Op::Modulo => match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(LambdaError::DivisionByZero { operator: "%" }),
            (Value::Int(l), Value::Int(r)) => Ok(Value::Int(floor_modulo(*l, *r))),
            _ => match (left.as_float(), right.as_float()) {
                (Some(l), Some(r)) => {
                    let remainder = l % r;
                    if remainder != 0.0 && (remainder < 0.0) != (r < 0.0) {
                        Ok(Value::Float(remainder + r))
                    } else {
                        Ok(Value::Float(remainder))
                    }
                }
                _ => Err(mismatch(operator, left, right)),
            },
        },
        Op::Power => power(left, right),
        Op::Concatenate => concatenate(left, right),
        Op::Equal => Ok(Value::Bool(left.loosely_equals(right))),
        Op::NotEqual => Ok(Value::Bool(!left.loosely_equals(right))),
        Op::Less | Op::LessEqual | Op::Greater | Op::GreaterEqual => {
            compare(operator, left, right).map(Value::Bool)
        }
    }
}

/// Applies `integer` to two integers, or `float` when either side is a float.
fn arithmetic(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
    integer: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> Result<Value, LambdaError> {
    if let (Value::Int(l), Value::Int(r)) = (left, right) {
        return integer(*l, *r)
            .map(Value::Int)
            .ok_or(LambdaError::Overflow { operator: operator.symbol() });
    }
    match (left.as_float(), right.as_float()) {
        (Some(l), Some(r)) => Ok(Value::Float(float(l, r))),
        _ => Err(mismatch(operator, left, right)),
    }
}

/// Integer division rounding towards negative infinity. `None` on overflow.
fn floor_divide(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;
    if left % right != 0 && (left < 0) != (right < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// Remainder with the sign of the divisor.
fn floor_modulo(left: i64, right: i64) -> i64 {
    let remainder = left.wrapping_rem(right);
    if remainder != 0 && (remainder < 0) != (right < 0) {
        remainder + right
    } else {
        remainder
    }
}

fn power(left: &Value, right: &Value) -> Result<Value, LambdaError> {
    if let (Value::Int(base), Value::Int(exponent)) = (left, right) {
        if let Ok(exponent) = u32::try_from(*exponent) {
            return base
                .checked_pow(exponent)
                .map(Value::Int)
                .ok_or(LambdaError::Overflow { operator: "^" });
        }
    }
    match (left.as_float(), right.as_float()) {
        (Some(base), Some(exponent)) => Ok(Value::Float(base.powf(exponent))),
        _ => Err(mismatch(BinaryOperator::Power, left, right)),
    }
}

/// Joins strings and numbers as text, or appends two lists.
fn concatenate(left: &Value, right: &Value) -> Result<Value, LambdaError> {
    match (left, right) {
        (Value::List(l), Value::List(r)) => Ok(l.iter().chain(r.iter()).cloned().collect()),
        (
            Value::Str(_) | Value::Int(_) | Value::Float(_),
            Value::Str(_) | Value::Int(_) | Value::Float(_),
        ) => Ok(Value::from(format!("{left}{right}"))),
        _ => Err(mismatch(BinaryOperator::Concatenate, left, right)),
    }
}

/// Orders two numbers or two strings.
fn compare(operator: BinaryOperator, left: &Value, right: &Value) -> Result<bool, LambdaError> {
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        (Value::Str(l), Value::Str(r)) => Some(l.cmp(r)),
        _ => match (left.as_float(), right.as_float()) {
            (Some(l), Some(r)) => l.partial_cmp(&r),
            _ => return Err(mismatch(operator, left, right)),
        },
    };
    // NaN compares false against everything.
    Ok(ordering.is_some_and(|ordering| test_ordering(operator, ordering)))
}

fn test_ordering(operator: BinaryOperator, ordering: Ordering) -> bool {
    match operator {
        BinaryOperator::Less => ordering == Ordering::Less,
        BinaryOperator::LessEqual => ordering != Ordering::Greater,
        BinaryOperator::Greater => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    }
}

fn index(target: &Value, position: &Value) -> Result<Value, LambdaError> {
    match (target, position) {
        (Value::List(_), Value::Int(position)) => Ok(target.get(*position)),
        (Value::Str(text), Value::Int(position)) => Ok(usize::try_from(*position)
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| text.chars().nth(index))
            .map_or(Value::Nil, |character| Value::from(character.to_string()))),
        _ => Err(LambdaError::OperandTypes {
            operator: "[]",
            left: target.type_name(),
            right: position.type_name(),
        }),
    }
}

fn length(count: usize) -> Value {
    Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

fn call(builtin: Builtin, mut arguments: Vec<Value>) -> Result<Value, LambdaError> {
    let type_error = |operand: &Value| LambdaError::OperandType {
        operator: builtin.name(),
        operand: operand.type_name(),
    };

    match builtin {
        Builtin::Min | Builtin::Max => {
            // A single list argument is searched element-wise.
            let candidates = match arguments.as_slice() {
                [Value::List(values)] => values.to_vec(),
                _ => arguments,
            };
            extremum(builtin, candidates)
        }
        _ => {
            let argument = arguments.pop().unwrap_or_default();
            match (builtin, &argument) {
                (Builtin::Len, Value::Str(text)) => Ok(length(text.chars().count())),
                (Builtin::Len, Value::List(values)) => Ok(length(values.len())),
                (Builtin::Abs, Value::Int(value)) => value
                    .checked_abs()
                    .map(Value::Int)
                    .ok_or(LambdaError::Overflow { operator: "abs" }),
                (Builtin::Abs, Value::Float(value)) => Ok(Value::Float(value.abs())),
                (Builtin::Floor, Value::Int(_)) => Ok(argument),
                (Builtin::Floor, Value::Float(value)) => Ok(floor(*value)),
                (Builtin::Str, Value::Str(_)) => Ok(argument),
                (Builtin::Str, _) => Ok(Value::from(argument.to_string())),
                _ => Err(type_error(&argument)),
            }
        }
    }
}

/// Floors a float, narrowing to an integer when it fits.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn floor(value: f64) -> Value {
    let floored = value.floor();
    if floored.is_finite() && floored >= i64::MIN as f64 && floored < i64::MAX as f64 {
        Value::Int(floored as i64)
    } else {
        Value::Float(floored)
    }
}

fn extremum(builtin: Builtin, candidates: Vec<Value>) -> Result<Value, LambdaError> {
    let wanted = if builtin == Builtin::Min {
        BinaryOperator::Less
    } else {
        BinaryOperator::Greater
    };
    let mut best: Option<Value> = None;
    for candidate in candidates {
        if candidate.as_float().is_none() {
            return Err(LambdaError::OperandType {
                operator: builtin.name(),
                operand: candidate.type_name(),
            });
        }
        best = match best {
            Some(current) if !compare(wanted, &candidate, &current)? => Some(current),
            _ => Some(candidate),
        };
    }
    Ok(best.unwrap_or_default())
}
