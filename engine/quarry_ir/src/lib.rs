//! Quarry IR - compiled rule expression trees.
//!
//! This crate defines the read-only data the rule compiler hands to the
//! evaluation core: a flat expression arena addressed by `ExprId`, the
//! operator enums, and the rule table.
//!
//! # Design
//!
//! - No `Box<Expr>`: children are `ExprId(u32)` indices into a
//!   contiguous `ExprArena`, so trees are cheap to build and walk.
//! - Entity handles (`StringId`, `VarId`, `RuleId`) index tables owned
//!   by the scan state, never pointers into it.
//! - Everything here is immutable once the compiler is done; the
//!   evaluator only reads.

mod expr;
mod id;
mod operators;
mod rules;

pub use expr::{Expr, ExprArena, Iterable, ReadWidth};
pub use id::{ExprId, RuleId, StringId, VarId};
pub use operators::{BinaryOp, UnaryOp};
pub use rules::{Rule, RuleSet};
