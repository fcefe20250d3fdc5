//! The quantifier engine.
//!
//! All three quantifier shapes share one counting rule: evaluate the
//! needed count once, walk the items counting satisfied bodies, and
//! compare. A needed count of zero means "all items"; chains preserve
//! their declaration order and duplicates, both of which count.

use tracing::trace;

use quarry_ir::{ExprId, Iterable, StringId, VarId};

use crate::errors::EvalResult;
use crate::evaluator::Evaluator;
use crate::value::Value;

/// The shared satisfaction rule.
///
/// `needed == 0` means all `total` items. An undefined or negative
/// needed count can never be met.
pub(crate) fn quota_met(needed: Value, total: usize, satisfied: usize) -> Value {
    let needed = match needed {
        Value::Undef => return Value::FALSE,
        Value::Int(n) if n < 0 => return Value::FALSE,
        Value::Int(0) => total,
        Value::Int(n) => match usize::try_from(n) {
            Ok(n) => n,
            // More than the address space holds items; unsatisfiable
            Err(_) => return Value::FALSE,
        },
    };
    Value::bool(satisfied >= needed)
}

impl Evaluator<'_, '_> {
    /// `N of (term, term, ...)`: count truthy terms.
    pub(crate) fn eval_of(&mut self, needed: ExprId, terms: &[ExprId]) -> EvalResult {
        let needed = self.eval(needed)?;
        let mut satisfied = 0usize;
        for &term in terms {
            if self.eval(term)?.truth() {
                satisfied += 1;
            }
        }
        trace!(?needed, total = terms.len(), satisfied, "of quantifier");
        Ok(quota_met(needed, terms.len(), satisfied))
    }

    /// `for N of (strings) : (body)`: evaluate the body once per chain
    /// element with that element bound as the anonymous string. The
    /// previous binding is restored after every iteration, so nested
    /// quantifier bodies see the binding they were entered under.
    pub(crate) fn eval_for_strings(
        &mut self,
        needed: ExprId,
        strings: &[StringId],
        body: ExprId,
    ) -> EvalResult {
        let needed = self.eval(needed)?;
        let mut satisfied = 0usize;
        for &string in strings {
            let saved = self.ctx.bind_string(Some(string));
            let result = self.eval(body);
            self.ctx.bind_string(saved);
            if result?.truth() {
                satisfied += 1;
            }
        }
        trace!(?needed, total = strings.len(), satisfied, "for-strings quantifier");
        Ok(quota_met(needed, strings.len(), satisfied))
    }

    /// `for N var in iterable : (body)`: evaluate the body once per
    /// produced integer with the counter bound for exactly that
    /// iteration.
    pub(crate) fn eval_for_iterable(
        &mut self,
        needed: ExprId,
        var: VarId,
        iterable: &Iterable,
        body: ExprId,
    ) -> EvalResult {
        let needed = self.eval(needed)?;
        let mut total = 0usize;
        let mut satisfied = 0usize;

        match iterable {
            Iterable::Range { min, max } => {
                let lo = self.eval(*min)?;
                let hi = self.eval(*max)?;
                let (Value::Int(lo), Value::Int(hi)) = (lo, hi) else {
                    // An undefined bound makes the whole quantifier
                    // false, matching the in-range rule for strings
                    return Ok(Value::FALSE);
                };
                let mut item = lo;
                while item <= hi {
                    total += 1;
                    if self.eval_with_counter(var, item, body)?.truth() {
                        satisfied += 1;
                    }
                    match item.checked_add(1) {
                        Some(next) => item = next,
                        None => break,
                    }
                }
            }
            Iterable::Set(items) => {
                for &item in items {
                    // An undefined member has no integer to bind
                    let Value::Int(value) = self.eval(item)? else {
                        continue;
                    };
                    total += 1;
                    if self.eval_with_counter(var, value, body)?.truth() {
                        satisfied += 1;
                    }
                }
            }
        }

        trace!(?needed, total, satisfied, "for-iterable quantifier");
        Ok(quota_met(needed, total, satisfied))
    }

    /// One iteration of an iterable quantifier body under a fresh
    /// counter binding. The binding is popped even when the body
    /// faults.
    fn eval_with_counter(&mut self, var: VarId, value: i64, body: ExprId) -> EvalResult {
        self.ctx.push_loop_binding(var, value);
        let result = self.eval(body);
        self.ctx.pop_loop_binding();
        result
    }
}
