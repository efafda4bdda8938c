//! A doubly-linked sequence container with owned nodes, built as a cycle
//! through a ghost node.
//!
//! A [`List`] inserts and removes next to a known node in constant time and
//! reaches a node from either end in linear time. Whole chains of nodes move
//! between lists without copying an element, see [`List::append`],
//! [`List::splice`] and [`List::merge`].
//!
//! ```
//! use seq_list::List;
//!
//! let mut list = List::from([1, 2, 4]);
//!
//! let mut cursor = list.cursor_end_mut();
//! cursor.move_prev().unwrap();
//! let three = cursor.insert(3);
//! assert_eq!(cursor.current(), Some(&4));
//!
//! list.push_front(0);
//! assert_eq!(list.erase(three), Ok(3));
//! assert_eq!(list.into_vec(), vec![0, 1, 2, 4]);
//! ```
//!
//! # Memory layout
//!
//! ```text
//!   List { ghost, len }
//!            │
//!            ↓
//!   ┌──→ [ghost] ⇄ [value 0] ⇄ [value 1] ⇄ ┄┄ ⇄ [value n-1] ──┐
//!   └────────────────────────────────────────────────────────┘
//! ```
//!
//! Every node is a separate heap allocation holding `next` and `prev` links
//! followed by its value. The ghost node has the same links and no value.
//! Its `next` link is the first node and its `prev` link the last one, so an
//! empty list is a ghost linked to itself.
//!
//! The list owns the ghost through a pointer, which is why moving or
//! swapping lists never touches a node, and why a node keeps its address
//! for as long as it stays in a list.
//!
//! # Cursors and positions
//!
//! A [`Cursor`] rests on one node of a borrowed list, the ghost included,
//! and steps to its neighbours. Stepping over the ghost fails with
//! [`ListError::CrossedEnd`] unless a cyclic move is used. A [`CursorMut`]
//! also edits the list around its node:
//! [`insert`](CursorMut::insert) links a value before it,
//! [`remove`](CursorMut::remove) unlinks it and
//! [`splice`](CursorMut::splice) moves another list in before it.
//!
//! A cursor holds the borrow of its list. To remember a node across edits,
//! keep its [`Position`] and later look it up with [`List::cursor_at`],
//! [`List::cursor_mut_at`] or one of the position-taking editing methods.
//!
//! ```
//! use seq_list::{List, ListError};
//!
//! let mut list = List::from(['a', 'c']);
//! let c = list.cursor_end().previous().copied();
//! assert_eq!(c, Some('c'));
//!
//! let mut cursor = list.cursor_start();
//! cursor.move_next().unwrap();
//! let pos = cursor.position();
//!
//! list.insert_before(pos, 'b').unwrap();
//! list.push_back('d');
//! assert_eq!(list.cursor_at(pos).unwrap().get(), Ok(&'c'));
//!
//! let mut end = list.cursor_end();
//! assert_eq!(end.move_next(), Err(ListError::CrossedEnd));
//! end.move_next_cyclic();
//! assert_eq!(end.get(), Ok(&'a'));
//! ```
//!
//! # Algorithms
//!
//! [`List::merge`], [`List::sort`], [`List::unique`] and [`List::reverse`]
//! relink the existing nodes, so the positions of kept nodes stay valid.
//!
//! ```
//! use seq_list::List;
//!
//! let mut list = List::from([5, 3, 4, 4, 4, 1, 9, 8]);
//! list.sort();
//! list.unique();
//! assert_eq!(list.to_vec(), vec![1, 3, 4, 5, 8, 9]);
//!
//! let mut other = List::from([2, 6]);
//! list.merge(&mut other);
//! list.reverse();
//! assert_eq!(list.into_vec(), vec![9, 8, 6, 5, 4, 3, 2, 1]);
//! ```
//!
//! Bulk structural operations emit `trace` records through the [`log`]
//! facade.

#[doc(inline)]
pub use error::ListError;
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut, Position};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::Queue;

pub mod error;
pub mod list;
pub mod queue;
