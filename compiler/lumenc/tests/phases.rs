// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Whole-pipeline tests, organized by the phase that decides the outcome.
//!
//! - `compile/` - programs rejected before evaluation, with their diagnostics
//! - `eval/` - programs that compile, checked by their evaluated value
//! - `common/` - shared helpers
//!
//! ```bash
//! cargo test -p lumenc --test phases
//! cargo test -p lumenc --test phases eval
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/compile/mod.rs"]
mod compile;

#[path = "phases/eval/mod.rs"]
mod eval;
