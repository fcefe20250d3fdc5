//! Test modules for the evaluation core.
//!
//! Scenario tests drive whole condition trees through [`evaluate`];
//! shared fixtures live here.

mod quantifier_tests;

use quarry_ir::{ExprArena, ExprId, RuleSet};

use crate::context::ScanContext;
use crate::errors::EvalResult;
use crate::evaluator::evaluate;
use crate::memory::MemoryBlock;
use crate::strings::StringTable;
use crate::variables::VariableTable;

/// Scan state owned by a test; contexts borrow from it.
#[derive(Default)]
pub(crate) struct Fixture {
    pub strings: StringTable,
    pub variables: VariableTable,
    pub rules: RuleSet,
    pub blocks: Vec<MemoryBlock>,
    pub file_size: Option<u64>,
    pub entry_point: Option<u64>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ctx(&self) -> ScanContext<'_> {
        let mut ctx = ScanContext::new(&self.strings, &self.variables, &self.rules, &self.blocks);
        if let Some(size) = self.file_size {
            ctx.set_file_size(size);
        }
        if let Some(entry_point) = self.entry_point {
            ctx.set_entry_point(entry_point);
        }
        ctx
    }

    pub(crate) fn eval(&self, exprs: &ExprArena, root: ExprId) -> EvalResult {
        let mut ctx = self.ctx();
        evaluate(exprs, root, &mut ctx)
    }
}

/// An expression that evaluates to undefined: the entry point of a
/// fixture that never parsed a header.
pub(crate) fn undefined_expr(exprs: &mut ExprArena) -> ExprId {
    exprs.alloc(quarry_ir::Expr::Entrypoint)
}
