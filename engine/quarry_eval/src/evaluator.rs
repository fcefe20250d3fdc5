//! The recursive dispatcher.
//!
//! `evaluate` reduces one expression node to a tri-state [`Value`],
//! consulting the scan context for scan-wide facts and delegating
//! quantified nodes to the quantifier engine (`quantifier.rs`, which
//! extends the same `Evaluator` impl).
//!
//! The node enum is closed and the dispatch match exhaustive, so there
//! is no "unrecognized kind" fallback; the only faults are the typed
//! errors in [`crate::errors`].

use tracing::trace;

use quarry_ir::{Expr, ExprArena, ExprId, StringId, VarId};

use crate::context::ScanContext;
use crate::errors::{EvalError, EvalResult};
use crate::matchers;
use crate::memory::read_integer;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;
use crate::variables::VarValue;

/// Evaluate a condition tree rooted at `root` against a scan's state.
///
/// The context is exclusively borrowed for the whole call: evaluation
/// is strictly single-threaded and mutates only the context's
/// transient bindings. Any non-zero defined result — and, by the
/// inherited truthiness rule, an undefined one — reads as "rule
/// matches" to callers.
pub fn evaluate(exprs: &ExprArena, root: ExprId, ctx: &mut ScanContext<'_>) -> EvalResult {
    let result = Evaluator { exprs, ctx }.eval(root);
    trace!(?root, ?result, "condition evaluated");
    result
}

pub(crate) struct Evaluator<'a, 'scan> {
    pub(crate) exprs: &'a ExprArena,
    pub(crate) ctx: &'a mut ScanContext<'scan>,
}

impl<'a, 'scan> Evaluator<'a, 'scan> {
    pub(crate) fn eval(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_node(id))
    }

    fn eval_node(&mut self, id: ExprId) -> EvalResult {
        let exprs = self.exprs;
        let expr = exprs.get(id).ok_or(EvalError::InvalidExpr(id))?;
        match expr {
            Expr::Const(value) => Ok(Value::Int(*value)),
            Expr::Filesize => Ok(self.ctx.file_size()),
            Expr::Entrypoint => Ok(self.ctx.entry_point()),

            Expr::Rule(rule) => {
                let condition = self
                    .ctx
                    .rules()
                    .get(*rule)
                    .ok_or(EvalError::UnknownRule(*rule))?
                    .condition();
                self.eval(condition)
            }

            Expr::StringFound(string) => {
                let pattern = self.ctx.resolve_string(*string)?;
                Ok(Value::bool(pattern.is_found()))
            }
            Expr::StringAt { string, offset } => self.eval_string_at(*string, *offset),
            Expr::StringInRange { string, min, max } => {
                self.eval_string_in_range(*string, *min, *max)
            }
            Expr::StringInSection { section, .. } => Err(EvalError::SectionScope {
                section: section.clone(),
            }),
            Expr::StringCount(string) => {
                let pattern = self.ctx.resolve_string(*string)?;
                Ok(Value::from_len(pattern.match_count()))
            }
            Expr::StringOffset { string, index } => self.eval_string_offset(*string, *index),

            Expr::And { left, right } => {
                if self.eval(*left)?.truth() {
                    Ok(Value::bool(self.eval(*right)?.truth()))
                } else {
                    Ok(Value::FALSE)
                }
            }
            Expr::Or { left, right } => {
                if self.eval(*left)?.truth() {
                    Ok(Value::TRUE)
                } else {
                    Ok(Value::bool(self.eval(*right)?.truth()))
                }
            }
            Expr::Binary { op, left, right } => {
                // Both operands evaluate unconditionally; only And/Or
                // short-circuit.
                let lhs = self.eval(*left)?;
                let rhs = self.eval(*right)?;
                evaluate_binary(lhs, rhs, *op)
            }
            Expr::Unary { op, operand } => {
                let value = self.eval(*operand)?;
                Ok(evaluate_unary(value, *op))
            }

            Expr::ReadInt { width, offset } => {
                let offset = match self.eval(*offset)? {
                    Value::Undef => return Ok(Value::Undef),
                    Value::Int(n) => n.cast_unsigned(),
                };
                Ok(read_integer(self.ctx.blocks(), offset, *width))
            }

            Expr::Variable(var) => self.eval_variable(*var),
            Expr::Matches { var, regex } => {
                let value = self.string_variable(*var)?;
                Ok(Value::bool(matchers::regex_matches(value, regex)))
            }
            Expr::Contains { var, needle } => {
                let value = self.string_variable(*var)?;
                Ok(Value::bool(matchers::contains(value, needle)))
            }

            Expr::Of { needed, terms } => self.eval_of(*needed, terms),
            Expr::ForStrings {
                needed,
                strings,
                body,
            } => self.eval_for_strings(*needed, strings, *body),
            Expr::ForIterable {
                needed,
                var,
                iterable,
                body,
            } => self.eval_for_iterable(*needed, *var, iterable, *body),
        }
    }

    /// `$a at offset`: found, and some match sits exactly there.
    ///
    /// The offset goes through [`Value::as_offset`], so an undefined
    /// offset compares against the legacy sentinel address and matches
    /// nothing instead of propagating.
    fn eval_string_at(&mut self, string: Option<StringId>, offset: ExprId) -> EvalResult {
        let pattern = self.ctx.resolve_string(string)?;
        if !pattern.is_found() {
            return Ok(Value::FALSE);
        }
        let offset = self.eval(offset)?.as_offset();
        let hit = pattern.matches().iter().any(|m| m.offset == offset);
        Ok(Value::bool(hit))
    }

    /// `$a in (min..max)`: an undefined bound yields false, not
    /// undefined; containment is inclusive over unsigned offsets.
    fn eval_string_in_range(
        &mut self,
        string: Option<StringId>,
        min: ExprId,
        max: ExprId,
    ) -> EvalResult {
        let pattern = self.ctx.resolve_string(string)?;
        if !pattern.is_found() {
            return Ok(Value::FALSE);
        }
        let lo = self.eval(min)?;
        let hi = self.eval(max)?;
        let (Value::Int(lo), Value::Int(hi)) = (lo, hi) else {
            return Ok(Value::FALSE);
        };
        let (lo, hi) = (lo.cast_unsigned(), hi.cast_unsigned());
        let hit = pattern
            .matches()
            .iter()
            .any(|m| m.offset >= lo && m.offset <= hi);
        Ok(Value::bool(hit))
    }

    /// `@a[index]`: 1-based; anything without a match at that position
    /// (index below 1, undefined, past the end) is undefined.
    fn eval_string_offset(&mut self, string: Option<StringId>, index: ExprId) -> EvalResult {
        let index = self.eval(index)?;
        let pattern = self.ctx.resolve_string(string)?;
        let Value::Int(index) = index else {
            return Ok(Value::Undef);
        };
        if index < 1 {
            return Ok(Value::Undef);
        }
        let nth = usize::try_from(index - 1)
            .ok()
            .and_then(|i| pattern.matches().get(i));
        Ok(nth.map_or(Value::Undef, |m| Value::Int(m.offset.cast_signed())))
    }

    /// A variable reference: quantifier counter bindings shadow the
    /// table slot; string slots test non-emptiness.
    fn eval_variable(&self, var: VarId) -> EvalResult {
        if let Some(value) = self.ctx.loop_value(var) {
            return Ok(Value::Int(value));
        }
        let variable = self
            .ctx
            .variables()
            .get(var)
            .ok_or(EvalError::UnknownVariable(var))?;
        Ok(match variable.value() {
            VarValue::Str(s) => Value::bool(!s.is_empty()),
            VarValue::Bool(b) => Value::bool(*b),
            VarValue::Int(n) => Value::Int(*n),
        })
    }

    fn string_variable(&self, var: VarId) -> Result<&'scan str, EvalError> {
        let variable = self
            .ctx
            .variables()
            .get(var)
            .ok_or(EvalError::UnknownVariable(var))?;
        match variable.value() {
            VarValue::Str(s) => Ok(s),
            VarValue::Bool(_) | VarValue::Int(_) => Err(EvalError::NotAStringVariable {
                name: variable.name().to_string(),
            }),
        }
    }
}
