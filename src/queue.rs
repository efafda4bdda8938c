//! A first-in first-out queue over [`List`].
//!
//! Elements enter at the back and leave from the front. The queue only uses
//! the public operations of the list.

use crate::error::ListError;
use crate::List;
use std::fmt;
use std::iter::FromIterator;

/// A FIFO queue backed by a [`List`].
///
/// # Examples
///
/// ```
/// use seq_list::{ListError, Queue};
///
/// let mut queue = Queue::from([1, 2, 3]);
/// queue.push(4);
///
/// assert_eq!(queue.front(), Ok(&1));
/// assert_eq!(queue.back(), Ok(&4));
/// assert_eq!(queue.pop(), Ok(1));
/// assert_eq!(queue.len(), 3);
///
/// let mut empty: Queue<i32> = Queue::new();
/// assert_eq!(empty.pop(), Err(ListError::EmptyContainer));
/// ```
pub struct Queue<T> {
    list: List<T>,
}

impl<T> Queue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// The element that [`Queue::pop`] would return next.
    pub fn front(&self) -> Result<&T, ListError> {
        self.list.front()
    }

    /// The most recently pushed element.
    pub fn back(&self) -> Result<&T, ListError> {
        self.list.back()
    }

    /// Returns `true` if the queue holds no element.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the number of queued elements, in *O*(1) time.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Add `value` at the back of the queue.
    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Remove the front element and return it, or
    /// [`ListError::EmptyContainer`] if the queue is empty.
    pub fn pop(&mut self) -> Result<T, ListError> {
        self.list.pop_front()
    }

    /// Exchange the contents of two queues in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.list.swap(&mut other.list);
    }

    /// Push each value of `values` at the back, in the given order.
    ///
    /// ```
    /// use seq_list::Queue;
    ///
    /// let mut queue = Queue::from([1, 2, 3]);
    /// queue.insert_many_back([4, 5, 6]);
    /// assert_eq!(queue.len(), 6);
    /// assert_eq!(queue.back(), Ok(&6));
    /// ```
    pub fn insert_many_back<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.list.insert_many_back(values);
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.list.clone_from(&source.list);
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Queue").field(&self.list).finish()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: List::from_iter(iter),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Queue<T> {
    fn from(array: [T; N]) -> Self {
        Self {
            list: List::from(array),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use crate::error::ListError;

    #[test]
    fn queue_fifo_order() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        (1..=5).for_each(|i| queue.push(i));
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.front(), Ok(&1));
        assert_eq!(queue.back(), Ok(&5));
        for i in 1..=5 {
            assert_eq!(queue.pop(), Ok(i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_empty_errors() {
        let mut queue: Queue<u8> = Queue::default();
        assert_eq!(queue.front(), Err(ListError::EmptyContainer));
        assert_eq!(queue.back(), Err(ListError::EmptyContainer));
        assert_eq!(queue.pop(), Err(ListError::EmptyContainer));
    }

    #[test]
    fn queue_swap_and_clone() {
        let mut a = Queue::from([1, 2, 3]);
        let mut b: Queue<i32> = [7, 8].into_iter().collect();
        a.swap(&mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.front(), Ok(&7));
        assert_eq!(b.back(), Ok(&3));

        let copy = b.clone();
        b.push(4);
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.back(), Ok(&3));

        let mut target = Queue::from([0; 8]);
        target.clone_from(&copy);
        assert_eq!(target.len(), 3);
        assert_eq!(target.front(), Ok(&1));
    }

    #[test]
    fn queue_insert_many_back() {
        let mut queue = Queue::from([1, 2, 3]);
        queue.insert_many_back([4, 5, 6]);
        assert_eq!(queue.len(), 6);
        for i in 1..=6 {
            assert_eq!(queue.pop(), Ok(i));
        }
    }
}
