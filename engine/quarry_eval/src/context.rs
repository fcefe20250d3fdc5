//! Per-scan evaluation context.
//!
//! One context per scan, exclusively owned for the duration of an
//! `evaluate` call. It carries the scan-wide facts (file size, entry
//! point, memory blocks) plus the two pieces of transient evaluation
//! state: the anonymous-string binding and the quantifier counter
//! bindings. Cross-scan isolation is by ownership, never by locking.

use quarry_ir::{RuleSet, StringId, VarId};

use crate::errors::EvalError;
use crate::memory::MemoryBlock;
use crate::strings::{StringPattern, StringTable};
use crate::value::Value;
use crate::variables::VariableTable;

/// Everything the evaluator consults besides the expression tree.
pub struct ScanContext<'scan> {
    file_size: Value,
    entry_point: Value,
    blocks: &'scan [MemoryBlock],
    strings: &'scan StringTable,
    variables: &'scan VariableTable,
    rules: &'scan RuleSet,
    current_string: Option<StringId>,
    loop_bindings: Vec<(VarId, i64)>,
}

impl<'scan> ScanContext<'scan> {
    /// Build a context over already-populated scan state. File size
    /// and entry point start out undefined; a headerless buffer keeps
    /// an undefined entry point for the whole scan.
    pub fn new(
        strings: &'scan StringTable,
        variables: &'scan VariableTable,
        rules: &'scan RuleSet,
        blocks: &'scan [MemoryBlock],
    ) -> Self {
        ScanContext {
            file_size: Value::Undef,
            entry_point: Value::Undef,
            blocks,
            strings,
            variables,
            rules,
            current_string: None,
            loop_bindings: Vec::new(),
        }
    }

    pub fn set_file_size(&mut self, size: u64) {
        self.file_size = Value::Int(size.cast_signed());
    }

    pub fn set_entry_point(&mut self, entry_point: u64) {
        self.entry_point = Value::Int(entry_point.cast_signed());
    }

    pub fn file_size(&self) -> Value {
        self.file_size
    }

    pub fn entry_point(&self) -> Value {
        self.entry_point
    }

    pub fn blocks(&self) -> &'scan [MemoryBlock] {
        self.blocks
    }

    pub fn strings(&self) -> &'scan StringTable {
        self.strings
    }

    pub fn variables(&self) -> &'scan VariableTable {
        self.variables
    }

    pub fn rules(&self) -> &'scan RuleSet {
        self.rules
    }

    /// Resolve a string reference: an explicit handle, or the current
    /// anonymous binding when the reference carries none.
    pub fn resolve_string(
        &self,
        string: Option<StringId>,
    ) -> Result<&'scan StringPattern, EvalError> {
        let id = match string {
            Some(id) => id,
            None => self
                .current_string
                .ok_or(EvalError::UnboundAnonymousString)?,
        };
        self.strings.get(id).ok_or(EvalError::UnknownString(id))
    }

    /// Swap the anonymous-string binding, returning the previous one.
    /// Quantifier iterations restore the saved binding before moving
    /// on, so bodies nest correctly.
    pub fn bind_string(&mut self, string: Option<StringId>) -> Option<StringId> {
        std::mem::replace(&mut self.current_string, string)
    }

    pub fn current_string(&self) -> Option<StringId> {
        self.current_string
    }

    /// Push a counter binding for one quantifier iteration.
    pub fn push_loop_binding(&mut self, var: VarId, value: i64) {
        self.loop_bindings.push((var, value));
    }

    /// Pop the innermost counter binding.
    pub fn pop_loop_binding(&mut self) {
        self.loop_bindings.pop();
    }

    /// The innermost binding for `var`, shadowing its table slot.
    pub fn loop_value(&self, var: VarId) -> Option<i64> {
        self.loop_bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == var)
            .map(|&(_, value)| value)
    }
}
