//! Stack growth for recursive lowering.
//!
//! The parser accepts arbitrarily deep expressions and blocks; lowering
//! walks the same depth, so it grows the stack the same way.

const RED_ZONE: usize = 100 * 1024; // 100KB
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Run `f`, growing the stack first if less than `RED_ZONE` remains.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
