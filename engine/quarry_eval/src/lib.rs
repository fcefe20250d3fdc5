//! Quarry Eval - condition evaluation core for the Quarry match engine.
//!
//! Given a compiled rule expression tree (`quarry_ir`) and the state a
//! prior scan left behind — which patterns were found and where, the
//! scanned content's memory segmentation, scan-wide facts — this crate
//! decides whether a rule's condition holds.
//!
//! # Architecture
//!
//! - [`Value`]: the tri-state result domain (64-bit integer or
//!   undefined)
//! - [`evaluate`]: the recursive dispatcher, one exhaustive match over
//!   node kinds
//! - `quantifier`: the shared "N of / for-all" counting engine
//! - [`read_integer`]: fixed-width reads over segmented memory
//! - `matchers`: regex and raw-substring tests on variable values
//! - [`ScanContext`]: per-scan facts plus the transient anonymous
//!   string and counter bindings
//!
//! # Concurrency
//!
//! Evaluation is synchronous and single-threaded; a context and the
//! tables it borrows belong to exactly one scan at a time. Run
//! parallel scans by giving each its own state, not by locking.

mod context;
mod errors;
mod evaluator;
mod matchers;
mod memory;
mod operators;
mod quantifier;
mod stack;
mod strings;
mod value;
mod variables;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;

pub use context::ScanContext;
pub use errors::{EvalError, EvalResult};
pub use evaluator::evaluate;
pub use matchers::{contains, regex_matches};
pub use memory::{read_integer, MemoryBlock};
pub use operators::{evaluate_binary, evaluate_unary};
pub use stack::ensure_sufficient_stack;
pub use strings::{Match, StringFlags, StringPattern, StringTable};
pub use value::Value;
pub use variables::{VarKind, VarValue, Variable, VariableTable};
