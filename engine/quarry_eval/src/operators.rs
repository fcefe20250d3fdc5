//! Operator dispatch over the tri-state domain.
//!
//! Direct enum-based dispatch: the operator set is fixed, so pattern
//! matching beats trait objects and stays exhaustiveness-checked.
//!
//! Undefined propagation is operator-class specific:
//! - comparisons collapse an undefined operand to false, never to
//!   undefined;
//! - arithmetic and bitwise operators propagate undefined;
//! - division and modulo by zero are faults, not undefined.

use quarry_ir::{BinaryOp, UnaryOp};

use crate::errors::{EvalError, EvalResult};
use crate::value::Value;

/// Evaluate a binary operation. Both operands were already evaluated
/// by the caller; there is no short-circuiting here.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    let (Value::Int(a), Value::Int(b)) = (left, right) else {
        return Ok(if op.is_comparison() {
            Value::FALSE
        } else {
            Value::Undef
        });
    };

    let value = match op {
        // Arithmetic wraps like two's-complement C
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Value::Int(a.wrapping_div(b))
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(EvalError::ModuloByZero);
            }
            Value::Int(a.wrapping_rem(b))
        }

        BinaryOp::BitXor => Value::Int(a ^ b),
        BinaryOp::BitAnd => Value::Int(a & b),
        BinaryOp::BitOr => Value::Int(a | b),
        // Shift counts outside 0..64 yield 0
        BinaryOp::Shl => Value::Int(checked_shift(a, b, i64::checked_shl)),
        BinaryOp::Shr => Value::Int(checked_shift(a, b, i64::checked_shr)),

        BinaryOp::Eq => Value::bool(a == b),
        BinaryOp::NotEq => Value::bool(a != b),
        BinaryOp::Lt => Value::bool(a < b),
        BinaryOp::LtEq => Value::bool(a <= b),
        BinaryOp::Gt => Value::bool(a > b),
        BinaryOp::GtEq => Value::bool(a >= b),
    };
    Ok(value)
}

/// Evaluate a unary operation.
///
/// Logical not works on truthiness — including the inherited rule that
/// undefined is truthy, so `not undefined` is false. Bitwise not
/// propagates undefined.
pub fn evaluate_unary(operand: Value, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Not => Value::bool(!operand.truth()),
        UnaryOp::BitNot => match operand {
            Value::Int(n) => Value::Int(!n),
            Value::Undef => Value::Undef,
        },
    }
}

fn checked_shift(a: i64, count: i64, shift: fn(i64, u32) -> Option<i64>) -> i64 {
    u32::try_from(count)
        .ok()
        .and_then(|c| shift(a, c))
        .unwrap_or(0)
}
