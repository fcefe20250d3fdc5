//! The tri-state result domain.
//!
//! Evaluation reduces every expression to a signed 64-bit integer that
//! doubles as a boolean (0/1), or to `Undef` when no result is
//! computable (a memory read outside every block, an out-of-range
//! match index). `Undef` is an explicit variant, not a reserved bit
//! pattern, so it can never collide with a legitimate integer.

use std::fmt;

/// The historical on-the-wire encoding of "undefined".
///
/// Kept only for [`Value::as_offset`]: offset comparisons against an
/// undefined operand must keep failing against this improbable address
/// rather than propagating undefinedness.
const LEGACY_UNDEFINED: u64 = 0x0000_FABA_DAFA_BADA;

/// Result of evaluating one expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum Value {
    /// A defined 64-bit result; booleans are 0/1.
    Int(i64),
    /// No computable result.
    Undef,
}

impl Value {
    pub const FALSE: Value = Value::Int(0);
    pub const TRUE: Value = Value::Int(1);

    /// Boolean result as 0/1.
    #[inline]
    pub const fn bool(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    /// A defined count; lengths beyond `i64::MAX` saturate.
    pub fn from_len(len: usize) -> Self {
        Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
    }

    #[inline]
    pub const fn is_undef(self) -> bool {
        matches!(self, Value::Undef)
    }

    /// Truthiness as used by AND/OR/NOT and quantifier bodies.
    ///
    /// `Undef` is truthy. The original engine encoded undefined as a
    /// non-zero sentinel integer, so boolean contexts saw it as true;
    /// rules in the field depend on that, and it is preserved here.
    #[inline]
    pub const fn truth(self) -> bool {
        match self {
            Value::Int(n) => n != 0,
            Value::Undef => true,
        }
    }

    /// The value as an unsigned match offset.
    ///
    /// Negative integers wrap, and `Undef` maps to the legacy sentinel
    /// address instead of short-circuiting: an at-offset test with an
    /// undefined offset quietly matches nothing. This mirrors the
    /// original cast-to-`size_t` behavior exactly.
    #[inline]
    pub const fn as_offset(self) -> u64 {
        match self {
            Value::Int(n) => n.cast_unsigned(),
            Value::Undef => LEGACY_UNDEFINED,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Undef => write!(f, "Undef"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Undef => write!(f, "undefined"),
        }
    }
}
