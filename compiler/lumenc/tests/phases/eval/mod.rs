//! Programs that compile, checked by their value.
//!
//! - `programs` - literals, operators, functions and currying
//! - `interfaces` - program-declared interfaces and implementations

mod interfaces;
mod programs;
