//! Stack safety for deep recursion.
//!
//! Condition trees nest as deep as the rule author (or generator)
//! made them; evaluation recursion tracks that depth. `stacker` grows
//! the stack ahead of the red zone instead of overflowing on
//! adversarially nested conditions.

/// Ensure sufficient stack space is available before executing `f`,
/// growing the stack if needed.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
