//! Lazy cons streams.
//!
//! A [`LazyList`] is a memoized chain of cells, each produced on demand, so
//! infinite lists such as `0..` are ordinary values. Only the cells and
//! elements a consumer actually forces are ever computed. Forcing an infinite
//! list to its end does not terminate; bounding it (`take`) is up to the
//! program.

use std::rc::Rc;

use crate::{EvaluationError, Lazy, LazyValue, Value};

#[derive(Clone, Debug)]
pub enum ListCell {
    Nil,
    Cons(LazyValue, LazyList),
}

#[derive(Clone, Debug)]
pub struct LazyList(Lazy<ListCell>);

impl LazyList {
    pub fn empty() -> Self {
        LazyList(Lazy::ready(ListCell::Nil))
    }

    pub fn cons(head: LazyValue, tail: LazyList) -> Self {
        LazyList(Lazy::ready(ListCell::Cons(head, tail)))
    }

    /// A list whose first cell is computed on demand.
    pub fn deferred(cell: impl FnOnce() -> Result<ListCell, EvaluationError> + 'static) -> Self {
        LazyList(Lazy::new(cell))
    }

    /// A finite list of already-built elements.
    pub fn from_values(values: impl IntoIterator<Item = LazyValue>) -> Self {
        let values: Vec<LazyValue> = values.into_iter().collect();
        values
            .into_iter()
            .rev()
            .fold(LazyList::empty(), |tail, head| LazyList::cons(head, tail))
    }

    /// Generate elements from a seed. `step` returns the next element and
    /// seed, or `None` to end the list.
    pub fn unfold<S, F>(seed: S, step: F) -> Self
    where
        S: 'static,
        F: Fn(&S) -> Result<Option<(LazyValue, S)>, EvaluationError> + 'static,
    {
        Self::unfold_shared(seed, Rc::new(step))
    }

    fn unfold_shared<S: 'static>(
        seed: S,
        step: Rc<dyn Fn(&S) -> Result<Option<(LazyValue, S)>, EvaluationError>>,
    ) -> Self {
        LazyList::deferred(move || {
            Ok(match step(&seed)? {
                Some((head, next)) => ListCell::Cons(head, Self::unfold_shared(next, step)),
                None => ListCell::Nil,
            })
        })
    }

    pub fn force_cell(&self) -> Result<ListCell, EvaluationError> {
        self.0.force()
    }

    /// Iterate over elements, forcing cells (not elements) as it goes.
    pub fn iter(&self) -> ListIter {
        ListIter {
            next: Some(self.clone()),
        }
    }

    /// Force the whole spine. Does not terminate on infinite lists.
    pub fn to_vec(&self) -> Result<Vec<LazyValue>, EvaluationError> {
        self.iter().collect()
    }

    /// Apply `f` to every element, lazily.
    pub fn map(&self, f: Rc<dyn Fn(LazyValue) -> LazyValue>) -> LazyList {
        let source = self.clone();
        LazyList::deferred(move || {
            Ok(match source.force_cell()? {
                ListCell::Nil => ListCell::Nil,
                ListCell::Cons(head, tail) => ListCell::Cons(f(head), tail.map(Rc::clone(&f))),
            })
        })
    }

    /// The first `count` elements.
    pub fn take(&self, count: usize) -> LazyList {
        if count == 0 {
            return LazyList::empty();
        }
        let source = self.clone();
        LazyList::deferred(move || {
            Ok(match source.force_cell()? {
                ListCell::Nil => ListCell::Nil,
                ListCell::Cons(head, tail) => ListCell::Cons(head, tail.take(count - 1)),
            })
        })
    }

    /// Everything after the first `count` elements.
    pub fn drop(&self, count: usize) -> LazyList {
        let source = self.clone();
        LazyList::deferred(move || {
            let mut list = source;
            for _ in 0..count {
                match list.force_cell()? {
                    ListCell::Nil => return Ok(ListCell::Nil),
                    ListCell::Cons(_, tail) => list = tail,
                }
            }
            list.force_cell()
        })
    }

    /// The element at `index`, if the list is long enough.
    pub fn get(&self, index: usize) -> Result<Option<LazyValue>, EvaluationError> {
        self.iter().nth(index).transpose()
    }
}

/// Unlinks the spine cell by cell. The derived drop would recurse once per
/// element and overflow the stack on long lists.
impl Drop for LazyList {
    fn drop(&mut self) {
        let mut cell = self.0.take_unique();
        while let Some(ListCell::Cons(_, mut tail)) = cell {
            cell = tail.0.take_unique();
        }
    }
}

impl From<Vec<Value>> for LazyList {
    fn from(values: Vec<Value>) -> Self {
        LazyList::from_values(values.into_iter().map(Lazy::ready))
    }
}

pub struct ListIter {
    next: Option<LazyList>,
}

impl Iterator for ListIter {
    type Item = Result<LazyValue, EvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.next.take()?;
        match list.force_cell() {
            Ok(ListCell::Nil) => None,
            Ok(ListCell::Cons(head, tail)) => {
                self.next = Some(tail);
                Some(Ok(head))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
