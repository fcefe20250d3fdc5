//! Expression nodes and the flat arena that owns them.
//!
//! One variant per condition-language construct. String references are
//! `Option<StringId>`: `None` is an anonymous reference, resolved
//! against the evaluation context's current binding inside a
//! for-strings quantifier body.

use regex::bytes::Regex;

use crate::id::{ExprId, RuleId, StringId, VarId};
use crate::operators::{BinaryOp, UnaryOp};

/// Width and signedness of a fixed-width memory read.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReadWidth {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
}

impl ReadWidth {
    /// Number of bytes the read consumes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
        }
    }

    /// Whether the raw bytes are sign-extended to 64 bits.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32)
    }
}

/// A finite, restartable producer of integer-valued item expressions
/// for the iterable quantifier.
///
/// `Range` bounds are evaluated once per quantifier run; `Set` members
/// are evaluated one by one in declaration order.
#[derive(Clone, Debug)]
pub enum Iterable {
    /// Inclusive integer range `min..=max`.
    Range { min: ExprId, max: ExprId },
    /// Explicit enumeration of item expressions.
    Set(Vec<ExprId>),
}

/// Expression node.
///
/// Built once by the rule compiler, read-only afterwards. Children are
/// arena indices; variant-specific payloads (string handles, compiled
/// regexes, literals) ride along in the node.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Integer literal.
    Const(i64),
    /// Size of the scanned object, from the evaluation context.
    Filesize,
    /// Entry point of the scanned object, from the evaluation context.
    Entrypoint,
    /// The referenced rule's own condition result.
    Rule(RuleId),

    /// `$a` — the string's found flag as 0/1.
    StringFound(Option<StringId>),
    /// `$a at expr` — some match sits exactly at the given offset.
    StringAt {
        string: Option<StringId>,
        offset: ExprId,
    },
    /// `$a in (min..max)` — some match offset falls inside the
    /// inclusive range.
    StringInRange {
        string: Option<StringId>,
        min: ExprId,
        max: ExprId,
    },
    /// `$a in section("name")` — reserved in the language, not
    /// supported by the evaluator.
    StringInSection {
        string: Option<StringId>,
        section: String,
    },
    /// `#a` — number of recorded matches.
    StringCount(Option<StringId>),
    /// `@a[expr]` — offset of the n-th match, 1-based.
    StringOffset {
        string: Option<StringId>,
        index: ExprId,
    },

    /// Short-circuit conjunction over truthiness.
    And { left: ExprId, right: ExprId },
    /// Short-circuit disjunction over truthiness.
    Or { left: ExprId, right: ExprId },
    /// Arithmetic, bitwise, or comparison operation; both operands are
    /// always evaluated.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// Logical not or bitwise complement.
    Unary { op: UnaryOp, operand: ExprId },

    /// Fixed-width integer read from the scanned memory at an offset.
    ReadInt { width: ReadWidth, offset: ExprId },

    /// External variable reference.
    Variable(VarId),
    /// Regex match against a string variable's current value.
    Matches { var: VarId, regex: Regex },
    /// Raw byte subsequence test against a string variable's value.
    Contains { var: VarId, needle: Vec<u8> },

    /// `N of (...)` — at least `needed` of the terms are satisfied;
    /// a needed count of 0 means all of them.
    Of { needed: ExprId, terms: Vec<ExprId> },
    /// `for N of (...) : (body)` — the body, evaluated once per chain
    /// element with that element bound as the anonymous string.
    ForStrings {
        needed: ExprId,
        strings: Vec<StringId>,
        body: ExprId,
    },
    /// `for N var in iterable : (body)` — the body, evaluated once per
    /// produced integer with the counter bound to it.
    ForIterable {
        needed: ExprId,
        var: VarId,
        iterable: Iterable,
        body: ExprId,
    },
}

/// Contiguous storage for expression nodes.
///
/// The compiler allocates children before parents, so any `ExprId`
/// held by a node points at an earlier slot.
#[derive(Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its handle.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "length is asserted to fit in u32 above"
    )]
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        assert!(
            self.exprs.len() < u32::MAX as usize,
            "expression arena overflow"
        );
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Look up a node; `None` for ids from a different arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    // Allocation shorthands used by the compiler and by tests.

    pub fn constant(&mut self, value: i64) -> ExprId {
        self.alloc(Expr::Const(value))
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(Expr::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.alloc(Expr::Unary { op, operand })
    }

    pub fn and(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(Expr::And { left, right })
    }

    pub fn or(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(Expr::Or { left, right })
    }
}
