use pretty_assertions::assert_eq;

use crate::common::value_of;

#[test]
fn test_program_interface() {
    assert_eq!(
        value_of(
            "interface Describe<T> { describe: (T) -> String }; \
             implement Describe<Integer> { describe = (x) => \"int\" }; \
             implement Describe<Boolean> { describe = (b) => if(b, \"yes\", \"no\") }; \
             [describe(1), describe(false)]"
        ),
        "[\"int\", \"no\"]"
    );
}

#[test]
fn test_generic_function_over_a_program_interface() {
    assert_eq!(
        value_of(
            "interface Size<T> { size: (T) -> Integer }; \
             implement Size<String> { size = (s) => 1 }; \
             implement Size<List<Integer>> { size = (xs) => length(xs) }; \
             let total = (a, b) => size(a) + size(b); \
             total(\"s\", [1, 2, 3])"
        ),
        "4"
    );
}
