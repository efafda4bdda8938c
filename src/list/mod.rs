use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::ListError;
use crate::list::cursor::{Cursor, CursorMut, Position};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// A doubly-linked sequence container with owned nodes.
///
/// The nodes form a cycle through a payload-less ghost node owned by the
/// list. The ghost stands for the end of the sequence: its `next` link is
/// the first node and its `prev` link the last one, so an empty list is a
/// ghost linked to itself and no link is ever null.
///
/// Inserting or removing next to a known node takes constant time, while
/// reaching a node from the front takes *O*(*n*) time. Whole chains of
/// nodes move between lists without reallocation, see [`List::splice`],
/// [`List::append`] and [`List::merge`].
pub struct List<T> {
    ghost: NonNull<Node<Erased>>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    next: NonNull<Node<T>>,
    prev: NonNull<Node<T>>,
    value: T,
}

/// Payload of the ghost node.
struct Erased;

/// A run of `len` nodes `first..=last` cut out of a list. The nodes are
/// still linked to each other, but `first.prev` and `last.next` are stale.
struct Chain<T> {
    first: NonNull<Node<T>>,
    last: NonNull<Node<T>>,
    len: usize,
}

/// Reads the `next` link of `node`.
///
/// Links are always accessed through raw places, so that the payload-less
/// ghost node is never viewed as a whole `Node<T>`.
///
/// # Safety
///
/// `node` must be a live node or a ghost node.
#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    ptr::addr_of!((*node.as_ptr()).next).read()
}

/// Reads the `prev` link of `node`.
///
/// # Safety
///
/// `node` must be a live node or a ghost node.
#[inline]
pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    ptr::addr_of!((*node.as_ptr()).prev).read()
}

/// Links `prev -> next` and `prev <- next`.
///
/// # Safety
///
/// Both nodes must be live nodes or ghost nodes.
#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    ptr::addr_of_mut!((*prev.as_ptr()).next).write(next);
    ptr::addr_of_mut!((*next.as_ptr()).prev).write(prev);
}

// Node bookkeeping shared by the list, its cursors and its algorithms.
impl<T> List<T> {
    fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost.cast()
    }

    fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost is always live and linked.
        unsafe { next_of(self.ghost_node()) }
    }

    fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost is always live and linked.
        unsafe { prev_of(self.ghost_node()) }
    }

    /// The value held by `node`, or `None` for the ghost node.
    fn value_of(&self, node: NonNull<Node<T>>) -> Option<&T> {
        if node == self.ghost_node() {
            return None;
        }
        // SAFETY: every non-ghost node reached from the list holds a value.
        unsafe { Some(&(*node.as_ptr()).value) }
    }

    /// The value held by `node`, or `None` for the ghost node.
    fn value_of_mut(&mut self, node: NonNull<Node<T>>) -> Option<&mut T> {
        if node == self.ghost_node() {
            return None;
        }
        // SAFETY: as in `value_of`, and `&mut self` makes the access exclusive.
        unsafe { Some(&mut (*node.as_ptr()).value) }
    }

    /// Allocates a node holding `value`, links it right before `next` and
    /// returns it.
    ///
    /// # Safety
    ///
    /// `next` must be a node of this list or its ghost node.
    unsafe fn link_before(&mut self, next: NonNull<Node<T>>, value: T) -> NonNull<Node<T>> {
        let node = Node::alloc(value);
        connect(prev_of(next), node);
        connect(node, next);
        self.len += 1;
        node
    }

    /// Unlinks `node`, frees it and returns its value.
    ///
    /// # Safety
    ///
    /// `node` must be a non-ghost node of this list.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        connect(prev_of(node), next_of(node));
        self.len -= 1;
        let node = Box::from_raw(node.as_ptr());
        node.value
    }

    /// Cuts the `len` nodes `first..=last` out of the list.
    ///
    /// # Safety
    ///
    /// `first..=last` must be a run of exactly `len` non-ghost nodes of
    /// this list, in list order.
    unsafe fn cut(&mut self, first: NonNull<Node<T>>, last: NonNull<Node<T>>, len: usize) -> Chain<T> {
        connect(prev_of(first), next_of(last));
        self.len -= len;
        Chain { first, last, len }
    }

    /// Links `chain` right before `next`.
    ///
    /// # Safety
    ///
    /// `next` must be a node of this list or its ghost node.
    unsafe fn graft(&mut self, next: NonNull<Node<T>>, chain: Chain<T>) {
        connect(prev_of(next), chain.first);
        connect(chain.last, next);
        self.len += chain.len;
    }

    /// Cuts every node out of the list, or returns `None` if it is empty.
    fn take_chain(&mut self) -> Option<Chain<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: `front..=back` holds all `len` nodes of the list.
        unsafe { Some(self.cut(self.front_node(), self.back_node(), self.len)) }
    }

    /// Looks the node of `pos` up among the nodes of this list, ghost
    /// included.
    fn find(&self, pos: Position<T>) -> Option<NonNull<Node<T>>> {
        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            // SAFETY: the walk follows the cycle and stops at the ghost.
            node = unsafe { next_of(node) };
            if node == pos.node {
                return Some(node);
            }
            if node == ghost {
                return None;
            }
        }
    }
}

impl<T> List<T> {
    /// Creates an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use seq_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: new_ghost(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a `List` holding `len` default values.
    ///
    /// # Examples
    /// ```
    /// use seq_list::List;
    ///
    /// let list: List<String> = List::with_len(2);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front().map(String::as_str), Ok(""));
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        (0..len).map(|_| T::default()).collect()
    }

    /// Returns `true` if the list holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements, in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from(['a', 'b']);
    /// list.push_front('z');
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the largest number of nodes a `List<T>` could address.
    #[inline]
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / mem::size_of::<Node<T>>()
    }

    /// Drops every element, front to back, and leaves the list empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::{List, ListError};
    ///
    /// let mut list = List::from([1, 2]);
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.front(), Err(ListError::EmptyContainer));
    /// ```
    pub fn clear(&mut self) {
        if let Some(chain) = self.take_chain() {
            log::trace!("clear {} nodes", chain.len);
            chain.free();
        }
    }

    /// Returns the first element, or [`ListError::EmptyContainer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), Err(ListError::EmptyContainer));
    ///
    /// list.push_back(7);
    /// assert_eq!(list.front(), Ok(&7));
    /// ```
    pub fn front(&self) -> Result<&T, ListError> {
        self.value_of(self.front_node())
            .ok_or(ListError::EmptyContainer)
    }

    /// Returns the last element, or [`ListError::EmptyContainer`].
    pub fn back(&self) -> Result<&T, ListError> {
        self.value_of(self.back_node())
            .ok_or(ListError::EmptyContainer)
    }

    /// Mutable access to the first element, or [`ListError::EmptyContainer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// *list.front_mut().unwrap() = 5;
    /// *list.back_mut().unwrap() += 5;
    /// assert_eq!(list.into_vec(), vec![5, 7]);
    /// ```
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        let front = self.front_node();
        self.value_of_mut(front).ok_or(ListError::EmptyContainer)
    }

    /// Mutable access to the last element, or [`ListError::EmptyContainer`].
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        let back = self.back_node();
        self.value_of_mut(back).ok_or(ListError::EmptyContainer)
    }

    /// Adds `value` before the first element in *O*(1) time.
    pub fn push_front(&mut self, value: T) {
        // SAFETY: the front node is the ghost or a node of this list.
        unsafe { self.link_before(self.front_node(), value) };
    }

    /// Adds `value` after the last element in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(2);
    /// list.push_front(1);
    /// list.push_back(3);
    /// assert_eq!(list.into_vec(), vec![1, 2, 3]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        // SAFETY: the ghost node belongs to this list.
        unsafe { self.link_before(self.ghost_node(), value) };
    }

    /// Removes the first element and returns it, or
    /// [`ListError::EmptyContainer`] if the list is empty.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::EmptyContainer);
        }
        // SAFETY: the list is not empty, so the front node is not the ghost.
        Ok(unsafe { self.unlink(self.front_node()) })
    }

    /// Removes the last element and returns it, or
    /// [`ListError::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::{List, ListError};
    ///
    /// let mut list = List::from([1, 2]);
    /// assert_eq!(list.pop_back(), Ok(2));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert_eq!(list.pop_back(), Err(ListError::EmptyContainer));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::EmptyContainer);
        }
        // SAFETY: the list is not empty, so the back node is not the ghost.
        Ok(unsafe { self.unlink(self.back_node()) })
    }

    /// Exchanges the contents of two lists in *O*(1) time. Only the ghost
    /// pointers and lengths change hands; no node is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut a = List::from([1, 2]);
    /// let mut b = List::from([3, 4, 5]);
    /// a.swap(&mut b);
    /// assert_eq!(a, List::from([3, 4, 5]));
    /// assert_eq!(b, List::from([1, 2]));
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Pushes each of `values` at the back, in the given order.
    pub fn insert_many_back<I: IntoIterator<Item = T>>(&mut self, values: I) {
        values.into_iter().for_each(|value| self.push_back(value));
    }

    /// Pushes each of `values` at the front, in the given order, so the
    /// last value given ends up first.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([4, 5, 6]);
    /// list.insert_many_front([1, 2, 3]);
    /// assert_eq!(list.into_vec(), vec![3, 2, 1, 4, 5, 6]);
    /// ```
    pub fn insert_many_front<I: IntoIterator<Item = T>>(&mut self, values: I) {
        values.into_iter().for_each(|value| self.push_front(value));
    }

    /// A cursor on the first node, or on the ghost node if the list is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node())
    }

    /// A cursor on the ghost node, one past the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let end = list.cursor_end();
    /// assert!(end.is_end());
    /// assert_eq!(end.previous(), Some(&3));
    ///
    /// let empty: List<i32> = List::new();
    /// assert_eq!(empty.cursor_start(), empty.cursor_end());
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node())
    }

    /// A cursor with editing operations on the first node, or on the ghost
    /// node if the list is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// A cursor with editing operations on the ghost node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let ghost = self.ghost_node();
        CursorMut::new(self, ghost)
    }

    /// A cursor on the node of `pos`, or `None` if no node of this list,
    /// ghost included, has that identity.
    ///
    /// This scans the list and takes *O*(*n*) time.
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
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert_eq!(list.cursor_at(two).unwrap().current(), Some(&2));
    ///
    /// let other = List::from([2]);
    /// assert!(other.cursor_at(two).is_none());
    /// ```
    pub fn cursor_at(&self, pos: Position<T>) -> Option<Cursor<'_, T>> {
        self.find(pos).map(|node| Cursor::new(self, node))
    }

    /// A cursor with editing operations on the node of `pos`, or `None` if
    /// no node of this list has that identity.
    ///
    /// Together with [`Cursor::position`], this widens a read-only cursor
    /// into a mutable one on the same node.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let last = list.cursor_end().position();
    ///
    /// let mut cursor = list.cursor_mut_at(last).unwrap();
    /// cursor.insert(4);
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn cursor_mut_at(&mut self, pos: Position<T>) -> Option<CursorMut<'_, T>> {
        let node = self.find(pos)?;
        Some(CursorMut::new(self, node))
    }

    /// Inserts `value` right before the node of `pos` and returns the
    /// position of the new node. Inserting before the ghost node appends.
    ///
    /// Fails with [`ListError::InvalidIterator`] if `pos` is not found in
    /// this list. [`CursorMut::insert`] does the same in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let end = list.cursor_end().position();
    /// let three = list.insert_before(end, 3).unwrap();
    /// list.insert_before(three, 2).unwrap();
    /// assert_eq!(list.into_vec(), vec![1, 3, 2, 3]);
    /// ```
    pub fn insert_before(&mut self, pos: Position<T>, value: T) -> Result<Position<T>, ListError> {
        let next = self.find(pos).ok_or(ListError::InvalidIterator)?;
        // SAFETY: `next` was just found in this list.
        let node = unsafe { self.link_before(next, value) };
        Ok(Position::new(node))
    }

    /// Inserts each of `values` right before the node of `pos`, so they
    /// appear in the given order in front of it.
    ///
    /// Returns the position of the last inserted node, or `pos` itself if
    /// `values` is empty. Fails with [`ListError::InvalidIterator`] if
    /// `pos` is not found in this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 2, 6]);
    /// let end = list.cursor_end().position();
    /// let eight = list.insert_many(end, [7, 8]).unwrap();
    /// let zero = list.insert_many(list.cursor_start().position(), [0]).unwrap();
    ///
    /// assert_eq!(list.cursor_at(eight).unwrap().current(), Some(&8));
    /// assert_eq!(list.cursor_at(zero).unwrap().current(), Some(&0));
    /// assert_eq!(list.into_vec(), vec![0, 1, 2, 6, 7, 8]);
    /// ```
    pub fn insert_many<I>(&mut self, pos: Position<T>, values: I) -> Result<Position<T>, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut cursor = self
            .cursor_mut_at(pos)
            .ok_or(ListError::InvalidIterator)?;
        Ok(cursor.insert_many(values))
    }

    /// Removes the node of `pos` and returns its value.
    ///
    /// Fails with [`ListError::InvalidIterator`] if `pos` is the ghost node
    /// or is not found in this list. [`CursorMut::remove`] does the same in
    /// *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::{List, ListError};
    ///
    /// let mut list = List::from([1, 9999, 20000]);
    /// assert_eq!(list.erase(list.cursor_start().position()), Ok(1));
    /// assert_eq!(list.erase(list.cursor_end().position()), Err(ListError::InvalidIterator));
    /// assert_eq!(list.into_vec(), vec![9999, 20000]);
    /// ```
    pub fn erase(&mut self, pos: Position<T>) -> Result<T, ListError> {
        match self.find(pos) {
            // SAFETY: `node` was just found in this list and is not the ghost.
            Some(node) if node != self.ghost_node() => Ok(unsafe { self.unlink(node) }),
            _ => Err(ListError::InvalidIterator),
        }
    }

    /// Moves every node of `other` right before the node of `pos`; `other`
    /// becomes empty. No element is copied or reallocated.
    ///
    /// Fails with [`ListError::InvalidIterator`], leaving both lists
    /// untouched, if `pos` is not found in this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 2, 6]);
    /// let mut other = List::from([3, 4, 5]);
    /// let mut cursor = list.cursor_end();
    /// cursor.move_prev().unwrap();
    ///
    /// list.splice(cursor.position(), &mut other).unwrap();
    /// assert!(other.is_empty());
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn splice(&mut self, pos: Position<T>, other: &mut Self) -> Result<(), ListError> {
        let mut cursor = self
            .cursor_mut_at(pos)
            .ok_or(ListError::InvalidIterator)?;
        cursor.splice(other);
        Ok(())
    }

    /// Moves every node of `other` to the back of the list in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from(['a']);
    /// let mut other = List::from(['b', 'c']);
    /// list.append(&mut other);
    /// assert!(other.is_empty());
    /// assert_eq!(list.into_vec(), vec!['a', 'b', 'c']);
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(chain) = other.take_chain() {
            // SAFETY: the ghost node belongs to this list.
            unsafe { self.graft(self.ghost_node(), chain) }
        }
    }

    /// Moves every node of `other` to the front of the list in *O*(1) time.
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(chain) = other.take_chain() {
            // SAFETY: the front node is the ghost or a node of this list.
            unsafe { self.graft(self.front_node(), chain) }
        }
    }

    /// Iterates over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Iterates over mutable references to the elements, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    /// list.iter_mut().for_each(|x| *x += 10);
    /// assert!(list.iter().eq(&[10, 11, 12]));
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves the elements into a `Vec`, front to back.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Clones the elements into a `Vec`, front to back.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Boxes `value` into an unlinked node. Its links dangle until the node
    /// is connected.
    fn alloc(value: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            value,
        });
        NonNull::from(Box::leak(node))
    }
}

impl<T> Chain<T> {
    /// Frees every node of the chain, front to back.
    fn free(self) {
        let mut node = self.first;
        for _ in 0..self.len {
            // SAFETY: the chain owns `len` linked nodes starting at `first`,
            // and each one is read before it is freed.
            unsafe {
                let next = next_of(node);
                drop(Box::from_raw(node.as_ptr()));
                node = next;
            }
        }
    }
}

fn new_ghost() -> NonNull<Node<Erased>> {
    let ghost = Node::alloc(Erased);
    // SAFETY: an empty list is a ghost linked to itself.
    unsafe { connect(ghost, ghost) };
    ghost
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was leaked from a box in `new_ghost`, and the
        // list is empty now.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// `List` and its read-only iterators must stay covariant in `T`.
#[allow(dead_code)]
fn assert_covariance() {
    fn list<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn iter<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn into_iter<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
