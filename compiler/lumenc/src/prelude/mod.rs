//! The standard library every program starts with.
//!
//! - `Numeric` (`+ - * / negate fromInteger`) for Integer and Float, and `%`
//! - `Equatable` (`== !=`) for Integer, Float, String and Boolean
//! - `Comparable` (`< <= > >=`) for Integer, Float and String
//! - `not`, `&&`, `||` and `if`
//! - lazy list functions, including the infinite `rangeFrom`
//! - `toFloat`, `toString` and `identity`

mod arguments;
mod arithmetic;
mod comparison;
mod conversions;
mod lists;
mod logic;

use crate::library::Library;

pub fn prelude() -> Library {
    arithmetic::library()
        .merge(comparison::library())
        .merge(logic::library())
        .merge(lists::library())
        .merge(conversions::library())
}

#[cfg(test)]
mod tests;
