use crate::list::{next_of, prev_of, List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The nodes `head..tail` an iterator has not yielded yet, `tail` excluded.
struct Span<T> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    len: usize,
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T> Span<T> {
    fn of(list: &List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.ghost_node(),
            len: list.len(),
        }
    }

    fn take_head(&mut self) -> Option<NonNull<Node<T>>> {
        if self.len == 0 {
            return None;
        }
        let node = self.head;
        // SAFETY: the span is not empty, so `head` is a live non-ghost node.
        self.head = unsafe { next_of(node) };
        self.len -= 1;
        Some(node)
    }

    fn take_tail(&mut self) -> Option<NonNull<Node<T>>> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the span is not empty, so `tail.prev` is a live non-ghost
        // node.
        self.tail = unsafe { prev_of(self.tail) };
        self.len -= 1;
        Some(self.tail)
    }
}

/// An iterator over the elements of a `List`, front to back.
///
/// It is double-ended and knows its exact length. The list stays borrowed
/// while it lives.
///
/// ```compile_fail
/// use seq_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let first = list.iter().next();
/// list.clear();
/// assert_eq!(first, Some(&1));
/// ```
pub struct Iter<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self::over(Span::of(list))
    }

    fn over(span: Span<T>) -> Self {
        Self {
            span,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self::over(self.span)
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: yielded nodes are non-ghost nodes of the borrowed list.
        self.span
            .take_head()
            .map(|node| unsafe { &(*node.as_ptr()).value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: as in `next`.
        self.span
            .take_tail()
            .map(|node| unsafe { &(*node.as_ptr()).value })
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An iterator over mutable references to the elements of a `List`.
///
/// The list can be neither read nor written while it lives.
///
/// ```compile_fail
/// use seq_list::List;
///
/// let mut list = List::from([1_usize, 2, 3]);
/// let mut values = list.iter_mut();
/// let len = list.len();
/// *values.next().unwrap() = len;
/// ```
pub struct IterMut<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The nodes left in the span have not been handed out yet.
        f.debug_list().entries(Iter::over(self.span)).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: yielded nodes are non-ghost nodes of the borrowed list, and
        // each node leaves the span once it is yielded.
        self.span
            .take_head()
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: as in `next`.
        self.span
            .take_tail()
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`, created by
/// [`List::into_iter`](IntoIterator::into_iter). Elements not yielded are
/// dropped with the iterator.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.insert_many_back(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_many_back(iter.into_iter().copied());
    }
}

/// Builds a list from a literal sequence, front to back.
///
/// ```
/// use seq_list::List;
///
/// let list = List::from([1, 2, 3]);
/// assert_eq!(list.front(), Ok(&1));
/// assert_eq!(list.back(), Ok(&3));
/// ```
impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;

    /// Takes `front` items from the front and the rest from the back, and
    /// checks every item and the length left on the way.
    fn drain_from_both_ends<I>(mut iter: I, expected: &[i32], front: usize)
    where
        I: DoubleEndedIterator<Item = i32> + ExactSizeIterator,
    {
        let (head, tail) = expected.split_at(front);
        for (taken, want) in head.iter().enumerate() {
            assert_eq!(iter.len(), expected.len() - taken);
            assert_eq!(iter.next(), Some(*want));
        }
        for want in tail.iter().rev() {
            assert_eq!(iter.next_back(), Some(*want));
        }
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iterators_from_both_ends() {
        for len in 0..6 {
            let expected: Vec<i32> = (0..len).collect();
            let mut list = List::from(expected.clone());
            for front in 0..=expected.len() {
                drain_from_both_ends(list.iter().copied(), &expected, front);
                drain_from_both_ends(list.iter_mut().map(|x| *x), &expected, front);
                drain_from_both_ends(list.clone().into_iter(), &expected, front);
            }
        }
    }

    #[test]
    fn iter_mut_writes_through() {
        let mut list = List::from([1, 2, 3]);
        let mut iter = list.iter_mut();
        *iter.next_back().unwrap() = 30;
        *iter.next().unwrap() = 10;
        assert_eq!(format!("{:?}", iter), "[2]");
        for x in &mut list {
            *x += 1;
        }
        assert_eq!(list.to_vec(), vec![11, 3, 31]);
    }

    #[test]
    fn iter_debug_and_last() {
        let list = List::from([1, 2, 3]);
        let mut iter = list.iter();
        assert_eq!(format!("{:?}", iter), "[1, 2, 3]");
        iter.next();
        assert_eq!(iter.clone().last(), Some(&3));
        assert_eq!(iter.len(), 2);
        assert_eq!(list.into_iter().last(), Some(3));
    }

    #[test]
    fn collect_and_extend() {
        let mut list: List<i32> = (1..=2).collect();
        list.extend([3, 4]);
        list.extend(&[5, 6]);
        assert_eq!(list.len(), 6);
        assert!(list.iter().eq(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(List::from(vec![1, 2]), List::from([1, 2]));

        let collected: Vec<_> = (&list).into_iter().rev().copied().collect();
        assert_eq!(collected, vec![6, 5, 4, 3, 2, 1]);
    }
}
