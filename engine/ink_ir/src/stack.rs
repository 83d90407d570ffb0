//! Stack growth for recursive walks over node trees.
//!
//! Markdown containers nest without limit (`> > > > ...`), so every recursive
//! walk over a [`Node`](crate::Node) tree goes through
//! [`ensure_sufficient_stack`]. On native targets the stack is grown with
//! `stacker` once less than the red zone remains; on WASM the closure runs
//! directly.

#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 64 * 1024;
#[cfg(not(target_arch = "wasm32"))]
const GROW_BY: usize = 1024 * 1024;

#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    fn depth(n: usize) -> usize {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
    }

    #[test]
    fn deep_recursion_completes() {
        assert_eq!(depth(200_000), 200_000);
    }
}
