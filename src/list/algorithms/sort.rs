use crate::list::{connect, next_of, prev_of, List, Node};
use std::ptr::NonNull;

/// Sort the whole list in place with a top-down merge sort on the nodes.
pub(super) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = list.len();
    if len < 2 {
        return;
    }
    // SAFETY: `front..ghost` is the valid range of all `len` nodes.
    unsafe { merge_sort_range(list.front_node(), list.ghost_node(), len, &mut less) };
}

/// Sort the `len` nodes of `start..end` and return the new first node of
/// the range. Nodes outside of the range, `end` included, stay put.
///
/// The range is split after exactly `len / 2` nodes.
unsafe fn merge_sort_range<T, F>(
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    len: usize,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    if len < 2 {
        return start;
    }
    let half = len / 2;
    let mut mid = start;
    (0..half).for_each(|_| mid = next_of(mid));

    let start = merge_sort_range(start, mid, half, less);
    let mid = merge_sort_range(mid, end, len - half, less);
    merge_range(start, mid, end, less)
}

/// Merge the sorted runs `start..mid` and `mid..end` in place, and return
/// the new first node of `start..end`.
///
/// A node of the left run is kept in place only while it is strictly less
/// than the front of the right run. Otherwise the front of the right run is
/// moved before it, so on ties the right run comes first.
pub(super) unsafe fn merge_range<T, F>(
    mut start: NonNull<Node<T>>,
    mid: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    // Layout while merging: [merged..][left..right)[right..end)
    let (mut left, mut right) = (start, mid);
    while left != right && right != end {
        if less(&(*left.as_ptr()).value, &(*right.as_ptr()).value) {
            left = next_of(left);
        } else {
            let next = next_of(right);
            if left == start {
                start = right;
            }
            move_node(right, left);
            right = next;
        }
    }
    start
}

/// Unlink `node` and relink it right before `to`.
unsafe fn move_node<T>(node: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    connect(prev_of(node), next_of(node));
    connect(prev_of(to), node);
    connect(node, to);
}

#[cfg(test)]
mod tests {
    use super::merge_range;
    use crate::list::tests::{assert_well_formed, nth_position};
    use crate::List;

    #[test]
    fn merge_range_in_place() {
        let list = List::from([1, 4, 9, 2, 3, 10]);
        let mid = nth_position(&list, 3);
        let new_front = unsafe {
            merge_range(
                list.front_node(),
                mid.node,
                list.ghost_node(),
                &mut |a: &i32, b: &i32| a < b,
            )
        };
        assert_eq!(new_front, list.front_node());
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 9, 10]);
        assert_well_formed(&list);
    }

    #[test]
    fn merge_range_right_run_first() {
        let list = List::from([5, 6, 1, 2]);
        let mid = nth_position(&list, 2);
        let new_front = unsafe {
            merge_range(
                list.front_node(),
                mid.node,
                list.ghost_node(),
                &mut |a: &i32, b: &i32| a < b,
            )
        };
        assert_eq!(new_front, mid.node);
        assert_eq!(list.to_vec(), vec![1, 2, 5, 6]);
        assert_well_formed(&list);
    }
}
