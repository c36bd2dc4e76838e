//! List functions.
//!
//! Lists are lazy streams: `range`, `rangeFrom`, `take`, `drop`, `slice`,
//! `map`, `filter` and `tail` build new streams without forcing elements.
//! `length`, `fold` and `sum` walk the whole spine.

use std::rc::Rc;

use lumen_eval::call;
use lumen_value::errors::{expected_argument, native};
use lumen_value::{EvalResult, Lazy, LazyList, LazyValue, ListCell, Value};

use super::arguments::{index, integer, list};
use crate::library::{Library, Signature};

pub(super) fn library() -> Library {
    Library::new()
        .native(
            "range",
            Signature::of("(Integer, Integer) -> List<Integer>"),
            2,
            |arguments| {
                let from = integer("range", &arguments[0])?;
                let to = integer("range", &arguments[1])?;
                Ok(Value::List(LazyList::unfold(from, move |&n| {
                    Ok((n < to).then(|| (Value::Integer(n).into_lazy(), n + 1)))
                })))
            },
        )
        .native(
            "rangeFrom",
            Signature::of("(Integer) -> List<Integer>"),
            1,
            |arguments| {
                let from = integer("rangeFrom", &arguments[0])?;
                Ok(Value::List(LazyList::unfold(Some(from), |&n| {
                    Ok(n.map(|n| (Value::Integer(n).into_lazy(), n.checked_add(1))))
                })))
            },
        )
        .native(
            "take",
            Signature::generic(&["E"], "(List<E>, Integer) -> List<E>"),
            2,
            |arguments| {
                let items = list("take", &arguments[0])?;
                Ok(Value::List(items.take(index("take", &arguments[1])?)))
            },
        )
        .native(
            "drop",
            Signature::generic(&["E"], "(List<E>, Integer) -> List<E>"),
            2,
            |arguments| {
                let items = list("drop", &arguments[0])?;
                Ok(Value::List(items.drop(index("drop", &arguments[1])?)))
            },
        )
        .native(
            "at",
            Signature::generic(&["E"], "(List<E>, Integer) -> E"),
            2,
            |arguments| {
                let items = list("at", &arguments[0])?;
                let position = index("at", &arguments[1])?;
                match items.get(position)? {
                    Some(item) => item.force(),
                    None => Err(native(format!("Index {position} is out of bounds."))),
                }
            },
        )
        .native(
            "slice",
            Signature::generic(&["E"], "(List<E>, Integer, Integer) -> List<E>"),
            3,
            |arguments| {
                let items = list("slice", &arguments[0])?;
                let from = index("slice", &arguments[1])?;
                let to = index("slice", &arguments[2])?;
                Ok(Value::List(items.drop(from).take(to.saturating_sub(from))))
            },
        )
        .native(
            "length",
            Signature::generic(&["E"], "(List<E>) -> Integer"),
            1,
            |arguments| {
                let items = list("length", &arguments[0])?;
                let mut length: i64 = 0;
                for item in items.iter() {
                    item?;
                    length += 1;
                }
                Ok(Value::Integer(length))
            },
        )
        .native(
            "head",
            Signature::generic(&["E"], "(List<E>) -> E"),
            1,
            |arguments| match list("head", &arguments[0])?.force_cell()? {
                ListCell::Cons(head, _) => head.force(),
                ListCell::Nil => Err(native("head of an empty list")),
            },
        )
        .native(
            "tail",
            Signature::generic(&["E"], "(List<E>) -> List<E>"),
            1,
            |arguments| Ok(Value::List(list("tail", &arguments[0])?.drop(1))),
        )
        .native(
            "map",
            Signature::generic(&["A", "B"], "(List<A>, (A) -> B) -> List<B>"),
            2,
            |arguments| {
                let items = list("map", &arguments[0])?;
                let function = arguments[1].clone();
                Ok(Value::List(items.map(Rc::new(move |item| {
                    let function = function.clone();
                    Lazy::new(move || call(&function.force()?, vec![item]))
                }))))
            },
        )
        .native(
            "filter",
            Signature::generic(&["E"], "(List<E>, (E) -> Boolean) -> List<E>"),
            2,
            |arguments| {
                let items = list("filter", &arguments[0])?;
                Ok(Value::List(filtered(items, arguments[1].clone())))
            },
        )
        .native(
            "fold",
            Signature::generic(&["E", "A"], "(List<E>, A, (A, E) -> A) -> A"),
            3,
            |arguments| {
                let items = list("fold", &arguments[0])?;
                let function = arguments[2].force()?;
                let mut accumulator = arguments[1].clone();
                for item in items.iter() {
                    accumulator = call(&function, vec![accumulator, item?])?.into_lazy();
                }
                accumulator.force()
            },
        )
        .native(
            "sum",
            Signature::generic(&["N"], "(List<N>) -> N").constrained("Numeric", &["N"]),
            2,
            sum,
        )
}

/// Elements satisfying `predicate`, found as the consumer asks for them.
fn filtered(items: LazyList, predicate: LazyValue) -> LazyList {
    LazyList::deferred(move || {
        let mut rest = items;
        loop {
            match rest.force_cell()? {
                ListCell::Nil => return Ok(ListCell::Nil),
                ListCell::Cons(head, tail) => {
                    if call(&predicate.force()?, vec![head.clone()])?.is_truthy() {
                        return Ok(ListCell::Cons(head, filtered(tail, predicate)));
                    }
                    rest = tail;
                }
            }
        }
    })
}

/// Takes the `Numeric` dictionary of the element type first.
fn sum(arguments: &[LazyValue]) -> EvalResult {
    let dictionary = match arguments[0].force()? {
        Value::Record(fields) => fields,
        other => return Err(expected_argument("sum", "a Numeric dictionary", &other)),
    };
    let member = |name: &str| match dictionary.get(name) {
        Some(value) => value.force(),
        None => Err(native(format!("sum: dictionary has no member {name}"))),
    };
    let add = member("+")?;
    let zero = call(&member("fromInteger")?, vec![Value::Integer(0).into_lazy()])?;

    let mut total = zero.into_lazy();
    for item in list("sum", &arguments[1])?.iter() {
        total = call(&add, vec![total, item?])?.into_lazy();
    }
    total.force()
}
