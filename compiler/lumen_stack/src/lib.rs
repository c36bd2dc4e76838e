//! Stack growth for recursive compiler passes.
//!
//! Parsing, type traversal, inference and evaluation all recurse once per
//! level of expression nesting. Each recursive step goes through
//! [`ensure_sufficient_stack`], which moves onto a freshly allocated segment
//! when the current one is close to exhausted.
//!
//! On native targets this is `stacker::maybe_grow`. On `wasm32` the closure
//! is called directly.

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Remaining stack below which a new segment is allocated (100KB).
    const RED_ZONE: usize = 100 * 1024;

    /// Size of each newly allocated segment (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Nested {
        Leaf(i64),
        Wrap(Box<Nested>),
    }

    fn depth(nested: &Nested) -> usize {
        ensure_sufficient_stack(|| match nested {
            Nested::Leaf(_) => 0,
            Nested::Wrap(inner) => depth(inner) + 1,
        })
    }

    fn unwrap_all(nested: Nested) -> i64 {
        let mut current = nested;
        loop {
            match current {
                Nested::Leaf(value) => return value,
                Nested::Wrap(inner) => current = *inner,
            }
        }
    }

    #[test]
    fn test_deeply_nested_walk() {
        let mut nested = Nested::Leaf(7);
        for _ in 0..200_000 {
            nested = Nested::Wrap(Box::new(nested));
        }
        assert_eq!(depth(&nested), 200_000);
        assert_eq!(unwrap_all(nested), 7);
    }

    #[test]
    fn test_passes_results_through() {
        let parsed: Result<i64, String> =
            ensure_sufficient_stack(|| "12".parse().map_err(|_| "bad".to_string()));
        assert_eq!(parsed, Ok(12));
        assert_eq!(ensure_sufficient_stack(|| "lumen".len()), 5);
    }
}
