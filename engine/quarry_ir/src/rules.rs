//! The compiled rule table.
//!
//! Rule-reference expressions resolve through this table: a `Rule`
//! records where its condition subtree lives in the arena.

use rustc_hash::FxHashMap;

use crate::id::{ExprId, RuleId};

/// A compiled rule: an identifier and the root of its condition tree.
#[derive(Clone, Debug)]
pub struct Rule {
    identifier: String,
    condition: ExprId,
}

impl Rule {
    pub fn new(identifier: impl Into<String>, condition: ExprId) -> Self {
        Rule {
            identifier: identifier.into(),
            condition,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn condition(&self) -> ExprId {
        self.condition
    }
}

/// Ordered rule table with identifier lookup.
#[derive(Default, Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
    by_name: FxHashMap<String, RuleId>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule and return its handle. A duplicate identifier
    /// shadows the earlier entry in name lookup only.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "length is asserted to fit in u32 above"
    )]
    pub fn add(&mut self, rule: Rule) -> RuleId {
        assert!(self.rules.len() < u32::MAX as usize, "rule table overflow");
        let id = RuleId::new(self.rules.len() as u32);
        self.by_name.insert(rule.identifier.clone(), id);
        self.rules.push(rule);
        id
    }

    #[inline]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.index())
    }

    pub fn by_name(&self, identifier: &str) -> Option<RuleId> {
        self.by_name.get(identifier).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}
