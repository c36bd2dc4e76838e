//! Programs rejected before evaluation.
//!
//! - `diagnostics` - message text and source ranges

mod diagnostics;
