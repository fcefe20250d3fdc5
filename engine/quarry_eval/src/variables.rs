//! External variable slots.
//!
//! Hosts declare named variables of a fixed kind and may overwrite
//! their values between evaluations. Quantifier loop counters do not
//! live here — they get per-invocation bindings on the evaluation
//! context, so nested quantification over one variable stays sound.

use rustc_hash::FxHashMap;

use quarry_ir::VarId;

/// Declared kind of a variable slot.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum VarKind {
    String,
    Boolean,
    Integer,
}

/// Current value of a variable slot.
#[derive(Clone, Debug, PartialEq)]
pub enum VarValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl VarValue {
    pub const fn kind(&self) -> VarKind {
        match self {
            VarValue::Str(_) => VarKind::String,
            VarValue::Bool(_) => VarKind::Boolean,
            VarValue::Int(_) => VarKind::Integer,
        }
    }
}

/// A named external slot holding exactly one value of its kind.
#[derive(Clone, Debug)]
pub struct Variable {
    name: String,
    value: VarValue,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: VarValue) -> Self {
        Variable {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.value.kind()
    }

    pub fn value(&self) -> &VarValue {
        &self.value
    }

    /// Overwrite the value. The host contract is that the kind never
    /// changes after declaration; the evaluator reads whatever is here.
    pub fn set(&mut self, value: VarValue) {
        self.value = value;
    }
}

/// Ordered variable table with name lookup, indexed by `VarId`.
#[derive(Default, Debug)]
pub struct VariableTable {
    vars: Vec<Variable>,
    by_name: FxHashMap<String, VarId>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable and return its handle.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "length is asserted to fit in u32 above"
    )]
    pub fn declare(&mut self, name: impl Into<String>, value: VarValue) -> VarId {
        assert!(self.vars.len() < u32::MAX as usize, "variable table overflow");
        let var = Variable::new(name, value);
        let id = VarId::new(self.vars.len() as u32);
        self.by_name.insert(var.name.clone(), id);
        self.vars.push(var);
        id
    }

    #[inline]
    pub fn get(&self, id: VarId) -> Option<&Variable> {
        self.vars.get(id.index())
    }

    pub fn get_mut(&mut self, id: VarId) -> Option<&mut Variable> {
        self.vars.get_mut(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<VarId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
