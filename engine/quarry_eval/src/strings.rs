//! Declared string patterns and their recorded matches.
//!
//! The external scanner populates this state before evaluation begins:
//! it marks patterns found and appends `Match` records in discovery
//! order. The evaluator only reads. Order is semantic — quantifier
//! chains and n-th-offset lookups follow discovery order, which is not
//! necessarily sorted by offset.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use quarry_ir::StringId;

bitflags! {
    /// Per-pattern state bits set by the scanner.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
    pub struct StringFlags: u32 {
        /// At least one occurrence was discovered.
        const FOUND = 1;
    }
}

/// A recorded occurrence of a pattern.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Match {
    /// Absolute offset of the occurrence in the scanned content.
    pub offset: u64,
}

/// A declared string pattern with its scan results.
#[derive(Clone, Debug)]
pub struct StringPattern {
    identifier: String,
    flags: StringFlags,
    matches: Vec<Match>,
}

impl StringPattern {
    pub fn new(identifier: impl Into<String>) -> Self {
        StringPattern {
            identifier: identifier.into(),
            flags: StringFlags::empty(),
            matches: Vec::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.flags.contains(StringFlags::FOUND)
    }

    /// Record an occurrence. Sets `FOUND` as a side effect.
    pub fn add_match(&mut self, offset: u64) {
        self.flags.insert(StringFlags::FOUND);
        self.matches.push(Match { offset });
    }

    /// Matches in discovery order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Drop all scan results so the pattern can be reused for the next
    /// scan. Scan state is per-scan mutable and must never be shared
    /// between concurrently running scans.
    pub fn reset(&mut self) {
        self.flags = StringFlags::empty();
        self.matches.clear();
    }
}

/// Ordered pattern table with identifier lookup, indexed by `StringId`.
#[derive(Default, Debug)]
pub struct StringTable {
    strings: Vec<StringPattern>,
    by_name: FxHashMap<String, StringId>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a pattern and return its handle.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "length is asserted to fit in u32 above"
    )]
    pub fn declare(&mut self, identifier: impl Into<String>) -> StringId {
        assert!(
            self.strings.len() < u32::MAX as usize,
            "string table overflow"
        );
        let pattern = StringPattern::new(identifier);
        let id = StringId::new(self.strings.len() as u32);
        self.by_name.insert(pattern.identifier.clone(), id);
        self.strings.push(pattern);
        id
    }

    #[inline]
    pub fn get(&self, id: StringId) -> Option<&StringPattern> {
        self.strings.get(id.index())
    }

    pub fn get_mut(&mut self, id: StringId) -> Option<&mut StringPattern> {
        self.strings.get_mut(id.index())
    }

    pub fn by_name(&self, identifier: &str) -> Option<StringId> {
        self.by_name.get(identifier).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Reset every pattern for the next scan.
    pub fn reset_all(&mut self) {
        for pattern in &mut self.strings {
            pattern.reset();
        }
    }
}
