use crate::error::ListError;
use crate::list::{next_of, prev_of, List, Node};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

/// A read-only cursor into a `List`.
///
/// A cursor rests either on a node of the list or on its ghost node, which
/// stands for "one past the last element". Stepping onto or off the ghost
/// node is refused with [`ListError::CrossedEnd`] unless the cyclic moves
/// are used.
///
/// # Examples
///
/// The ghost node is written `#` below.
/// ```
/// use seq_list::{List, ListError};
///
/// let list = List::from(['A', 'B', 'C']);
///
/// // [|A B C #]
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.get(), Ok(&'A'));
/// assert_eq!(cursor.move_prev(), Err(ListError::CrossedEnd));
///
/// // [ A B C|#]
/// cursor.move_to_end();
/// assert_eq!(cursor.get(), Err(ListError::NullDereference));
/// assert_eq!(cursor.previous(), Some(&'C'));
/// assert_eq!(cursor.move_next(), Err(ListError::CrossedEnd));
///
/// // [|A B C #]
/// cursor.move_next_cyclic();
/// assert_eq!(cursor, list.cursor_start());
/// ```
pub struct Cursor<'a, T: 'a> {
    node: NonNull<Node<T>>,
    list: &'a List<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            list: self.list,
        }
    }
}

/// Cursors are equal when they rest on the same node.
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// A cursor into a `List` with editing operations.
///
/// The cursor holds the only mutable borrow of its list, so every
/// structural edit made while it lives goes through it. References it
/// hands out borrow the cursor itself.
///
/// ```compile_fail
/// use seq_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// cursor.insert(0);
/// ```
pub struct CursorMut<'a, T: 'a> {
    node: NonNull<Node<T>>,
    list: &'a mut List<T>,
}

/// The identity of a node, or of the ghost node, of some `List`.
///
/// A `Position` borrows nothing and never reads memory by itself; it is
/// turned back into a cursor with [`List::cursor_at`] or
/// [`List::cursor_mut_at`], which look it up among the current nodes of the
/// list. It keeps naming the same node across any edit that leaves that
/// node in the list: insertion, removal of other nodes, splice, merge,
/// sort, unique and reverse.
///
/// Using a position after its node was removed is a caller error. Nothing
/// unsafe happens, but the freed address may be reused by a later node, so
/// the stale position may resolve to an unrelated element.
///
/// # Examples
///
/// ```
/// use seq_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.cursor_start();
/// cursor.move_next().unwrap();
/// let two = cursor.position();
///
/// list.push_front(0);
/// list.push_back(4);
/// assert_eq!(list.erase(two), Ok(2));
/// assert_eq!(list.into_vec(), vec![0, 1, 3, 4]);
/// ```
pub struct Position<T> {
    pub(crate) node: NonNull<Node<T>>,
}

impl<T> Position<T> {
    pub(crate) fn new(node: NonNull<Node<T>>) -> Self {
        Self { node }
    }
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Position").field(&self.node).finish()
    }
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> $CURSOR<'a, T> {
            fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every link of the cycle is valid.
                unsafe { prev_of(self.node) }
            }

            /// Returns `true` if the cursor rests on the ghost node.
            pub fn is_end(&self) -> bool {
                self.node == self.list.ghost_node()
            }

            /// The identity of the node under the cursor. See [`Position`].
            pub fn position(&self) -> Position<T> {
                Position::new(self.node)
            }

            /// Steps to the next node, or fails with
            /// [`ListError::CrossedEnd`] if the cursor rests on the ghost
            /// node.
            pub fn move_next(&mut self) -> Result<(), ListError> {
                if self.is_end() {
                    return Err(ListError::CrossedEnd);
                }
                self.move_next_cyclic();
                Ok(())
            }

            /// Steps to the previous node, or fails with
            /// [`ListError::CrossedEnd`] if the cursor rests on the first
            /// node (or on the ghost node of an empty list).
            ///
            /// # Examples
            ///
            /// ```
            /// use seq_list::{List, ListError};
            ///
            /// let list = List::from([1, 2]);
            /// let mut cursor = list.cursor_end();
            /// assert_eq!(cursor.move_prev(), Ok(()));
            /// assert_eq!(cursor.move_prev(), Ok(()));
            /// assert_eq!(cursor.get(), Ok(&1));
            /// assert_eq!(cursor.move_prev(), Err(ListError::CrossedEnd));
            /// assert_eq!(cursor.get(), Ok(&1));
            /// ```
            pub fn move_prev(&mut self) -> Result<(), ListError> {
                if self.node == self.list.front_node() {
                    return Err(ListError::CrossedEnd);
                }
                self.move_prev_cyclic();
                Ok(())
            }

            /// Steps to the next node, going from the ghost node round to the
            /// first one.
            pub fn move_next_cyclic(&mut self) {
                // SAFETY: every link of the cycle is valid.
                self.node = unsafe { next_of(self.node) };
            }

            /// Steps to the previous node, going from the first node round to
            /// the ghost one.
            pub fn move_prev_cyclic(&mut self) {
                self.node = self.prev_node();
            }

            /// Puts the cursor on the first node, or on the ghost node of an
            /// empty list.
            pub fn move_to_start(&mut self) {
                self.node = self.list.front_node();
            }

            /// Puts the cursor on the ghost node.
            pub fn move_to_end(&mut self) {
                self.node = self.list.ghost_node();
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("current", &self.list.value_of(self.node))
                    .field("list", &self.list)
                    .finish()
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, node: NonNull<Node<T>>) -> Self {
        Self { node, list }
    }

    /// The element under the cursor, or `None` on the ghost node.
    pub fn current(&self) -> Option<&'a T> {
        self.list.value_of(self.node)
    }

    /// The element before the cursor, or `None` on the first node.
    pub fn previous(&self) -> Option<&'a T> {
        self.list.value_of(self.prev_node())
    }

    /// Dereferences the cursor, or fails with
    /// [`ListError::NullDereference`] on the ghost node.
    pub fn get(&self) -> Result<&'a T, ListError> {
        self.current().ok_or(ListError::NullDereference)
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, node: NonNull<Node<T>>) -> Self {
        Self { node, list }
    }

    /// The element under the cursor, or `None` on the ghost node.
    pub fn current(&self) -> Option<&T> {
        self.list.value_of(self.node)
    }

    /// The element before the cursor, or `None` on the first node.
    pub fn previous(&self) -> Option<&T> {
        self.list.value_of(self.prev_node())
    }

    /// Dereferences the cursor, or fails with
    /// [`ListError::NullDereference`] on the ghost node.
    pub fn get(&self) -> Result<&T, ListError> {
        self.current().ok_or(ListError::NullDereference)
    }

    /// The element under the cursor, mutably, or `None` on the ghost node.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let node = self.node;
        self.list.value_of_mut(node)
    }

    /// Dereferences the cursor mutably, or fails with
    /// [`ListError::NullDereference`] on the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::{List, ListError};
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// *cursor.get_mut().unwrap() = 10;
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.get_mut(), Err(ListError::NullDereference));
    /// assert_eq!(list.into_vec(), vec![10, 2, 3]);
    /// ```
    pub fn get_mut(&mut self) -> Result<&mut T, ListError> {
        self.current_mut().ok_or(ListError::NullDereference)
    }

    /// Reborrows the cursor as a read-only one on the same node.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.node)
    }

    /// Gives up editing and keeps a read-only cursor on the same node.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        let Self { node, list } = self;
        Cursor::new(list, node)
    }

    /// Inserts `value` right before the cursor and returns the position of
    /// the new node, in *O*(1) time. The cursor stays on its node, so on the
    /// ghost node this appends.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.move_next().unwrap();
    ///
    /// cursor.insert(2);
    /// assert_eq!(cursor.current(), Some(&3));
    /// assert_eq!(cursor.previous(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert(4);
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, value: T) -> Position<T> {
        // SAFETY: the cursor rests on a node of its list.
        let node = unsafe { self.list.link_before(self.node, value) };
        Position::new(node)
    }

    /// Inserts each of `values` right before the cursor, so they appear in
    /// the given order in front of its node.
    ///
    /// Returns the position of the last inserted node, or the cursor's own
    /// position if `values` is empty.
    pub fn insert_many<I: IntoIterator<Item = T>>(&mut self, values: I) -> Position<T> {
        let start = self.position();
        values
            .into_iter()
            .fold(start, |_, value| self.insert(value))
    }

    /// Removes the element under the cursor and returns it, in *O*(1)
    /// time. The cursor moves on to the next node.
    ///
    /// Fails with [`ListError::InvalidIterator`] on the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::{List, ListError};
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// assert_eq!(cursor.remove(), Ok(1));
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), Err(ListError::InvalidIterator));
    /// assert_eq!(list.into_vec(), vec![2, 3]);
    /// ```
    pub fn remove(&mut self) -> Result<T, ListError> {
        if self.is_end() {
            return Err(ListError::InvalidIterator);
        }
        let node = self.node;
        self.move_next_cyclic();
        // SAFETY: `node` is a non-ghost node of the list, and the cursor
        // has left it.
        Ok(unsafe { self.list.unlink(node) })
    }

    /// Moves every node of `other` right before the cursor in *O*(1) time;
    /// `other` becomes empty. The cursor stays on its node.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 5]);
    /// let mut other = List::from([2, 3, 4]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.move_next().unwrap();
    ///
    /// cursor.splice(&mut other);
    /// assert_eq!(cursor.current(), Some(&5));
    /// assert!(other.is_empty());
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn splice(&mut self, other: &mut List<T>) {
        if let Some(chain) = other.take_chain() {
            log::trace!("splice {} nodes before the cursor", chain.len);
            // SAFETY: the cursor rests on a node of its list.
            unsafe { self.list.graft(self.node, chain) };
        }
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::list::tests::{assert_well_formed, index_of};
    use crate::list::List;

    #[test]
    fn cursor_walks_and_stops_at_ends() {
        let list = List::from([1, 2, 3]);
        let mut cursor = list.cursor_start();
        assert_eq!(cursor.move_prev(), Err(ListError::CrossedEnd));
        assert_eq!(cursor.get(), Ok(&1));
        assert_eq!(cursor.previous(), None);

        let mut seen = Vec::new();
        while let Ok(value) = cursor.get() {
            seen.push(*value);
            cursor.move_next().unwrap();
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(cursor.is_end());
        assert_eq!(cursor.move_next(), Err(ListError::CrossedEnd));
        assert_eq!(cursor, list.cursor_end());

        cursor.move_next_cyclic();
        assert_eq!(cursor, list.cursor_start());
        cursor.move_prev_cyclic();
        assert!(cursor.is_end());
        assert_eq!(cursor.move_prev(), Ok(()));
        assert_eq!(cursor.current(), Some(&3));
    }

    #[test]
    fn cursor_empty_list() {
        let mut list: List<i32> = List::new();
        let mut cursor = list.cursor_start();
        assert!(cursor.is_end());
        assert_eq!(cursor.move_next(), Err(ListError::CrossedEnd));
        assert_eq!(cursor.move_prev(), Err(ListError::CrossedEnd));
        cursor.move_next_cyclic();
        cursor.move_prev_cyclic();
        assert_eq!(cursor, list.cursor_end());
        assert_eq!(cursor.previous(), None);

        let mut cursor = list.cursor_start_mut();
        assert_eq!(cursor.remove(), Err(ListError::InvalidIterator));
        assert_eq!(cursor.get_mut(), Err(ListError::NullDereference));
        assert_eq!(cursor.insert_many(None), cursor.position());
        assert!(list.is_empty());
    }

    #[test]
    fn cursor_equality_is_node_identity() {
        let list = List::from([7, 7]);
        let first = list.cursor_start();
        let mut second = first.clone();
        assert_eq!(first, second);
        second.move_next().unwrap();
        assert_eq!(first.get(), second.get());
        assert_ne!(first, second);

        let copy = list.clone();
        assert_ne!(first, copy.cursor_start());
    }

    #[test]
    fn cursor_positions_round_trip() {
        let mut list = List::from(['a', 'b', 'c']);
        let mut cursor = list.cursor_start();
        cursor.move_next().unwrap();
        let pos = cursor.position();

        let mut cursor = list.cursor_mut_at(pos).unwrap();
        *cursor.get_mut().unwrap() = 'B';
        assert_eq!(cursor.as_cursor().previous(), Some(&'a'));
        let read_only = cursor.into_cursor();
        assert_eq!(read_only.get(), Ok(&'B'));
        assert_eq!(read_only.position(), pos);

        let end = list.cursor_end().position();
        assert!(list.cursor_at(end).unwrap().is_end());
    }

    #[test]
    fn cursor_mut_edits_around_its_node() {
        let mut list = List::from([1, 5]);
        let mut cursor = list.cursor_end_mut();
        cursor.move_prev().unwrap();

        let four = cursor.insert_many([2, 3, 4]);
        assert_eq!(cursor.current(), Some(&5));
        assert_eq!(cursor.previous(), Some(&4));

        cursor.move_prev().unwrap();
        assert_eq!(cursor.position(), four);
        assert_eq!(cursor.remove(), Ok(4));
        assert_eq!(cursor.remove(), Ok(5));
        assert!(cursor.is_end());
        assert_eq!(cursor.remove(), Err(ListError::InvalidIterator));

        let six = cursor.insert(6);
        assert!(cursor.is_end());
        let cursor: crate::Cursor<'_, i32> = cursor.into();
        assert_eq!(cursor.previous(), Some(&6));

        assert_eq!(list.to_vec(), vec![1, 2, 3, 6]);
        assert_eq!(index_of(&list, six), 3);
        assert_well_formed(&list);
    }

    #[test]
    fn cursor_splice() {
        let mut list = List::from([1, 5]);
        let mut other = List::from([2, 3, 4]);
        let mut cursor = list.cursor_start_mut();
        cursor.move_next().unwrap();
        cursor.splice(&mut other);
        cursor.splice(&mut List::new());
        assert_eq!(cursor.current(), Some(&5));
        assert_eq!(cursor.previous(), Some(&4));

        cursor.move_to_start();
        cursor.splice(&mut List::from([0]));
        cursor.move_to_end();
        cursor.splice(&mut List::from([6]));

        assert!(other.is_empty());
        assert_eq!(list.to_vec(), Vec::from_iter(0..7));
        assert_well_formed(&list);
        assert_well_formed(&other);
    }
}
