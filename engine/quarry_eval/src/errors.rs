//! Evaluation faults.
//!
//! "Undefined" is not an error: it flows through [`crate::Value`].
//! `EvalError` is reserved for conditions with no defined value
//! semantics at all — arithmetic faults and trees that reference
//! entities the scan state does not have.

use quarry_ir::{ExprId, RuleId, StringId, VarId};
use thiserror::Error;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// A fault raised during condition evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    /// An anonymous string reference (`$`) outside any for-strings
    /// quantifier body.
    #[error("anonymous string reference outside a string quantifier")]
    UnboundAnonymousString,

    /// Section-scoped string tests are parsed but not evaluable.
    #[error("string match scoped to section {section:?} is not supported")]
    SectionScope { section: String },

    // The remaining variants indicate a tree/state mismatch: the
    // compiler produced ids the scan state does not know about.
    #[error("{0:?} is out of bounds for the expression arena")]
    InvalidExpr(ExprId),

    #[error("{0:?} is not present in the rule set")]
    UnknownRule(RuleId),

    #[error("{0:?} is not present in the string table")]
    UnknownString(StringId),

    #[error("{0:?} is not present in the variable table")]
    UnknownVariable(VarId),

    /// A `matches`/`contains` node bound to a non-string variable.
    #[error("variable {name:?} does not hold a string value")]
    NotAStringVariable { name: String },
}
