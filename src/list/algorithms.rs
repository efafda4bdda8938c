use crate::list::{next_of, List};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ptr;

mod sort;

use sort::{merge_range, merge_sort};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrite the existing elements in place, append what is missing
    /// and drop the excess nodes.
    fn clone_from(&mut self, other: &Self) {
        let mut cursor = self.cursor_start_mut();
        for elem_other in other {
            match cursor.current_mut() {
                Some(elem) => {
                    elem.clone_from(elem_other);
                    cursor.move_next_cyclic();
                }
                None => {
                    cursor.insert(elem_other.clone());
                }
            }
        }
        while cursor.remove().is_ok() {}
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Merge the nodes of `other` into the list. If both lists are sorted,
    /// the result is sorted. `other` becomes empty.
    ///
    /// Walking both lists from the front, a node of `self` goes first only
    /// when it is strictly less than the next node of `other`, so of two
    /// equal elements the one from `other` comes first. No element is
    /// copied or reallocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 9999, 20000]);
    /// let mut other = List::from([500, 15000, 30000]);
    ///
    /// list.merge(&mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(list.into_vec(), vec![1, 500, 9999, 15000, 20000, 30000]);
    /// ```
    pub fn merge(&mut self, other: &mut Self)
    where
        T: PartialOrd,
    {
        self.merge_by(other, |a, b| a < b);
    }

    /// Merge the nodes of `other` into the list with a strict "less than"
    /// predicate. See [`List::merge`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([9, 5, 1]);
    /// let mut other = List::from([8, 2]);
    ///
    /// list.merge_by(&mut other, |a, b| a > b);
    /// assert_eq!(list.into_vec(), vec![9, 8, 5, 2, 1]);
    /// ```
    pub fn merge_by<F>(&mut self, other: &mut Self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if other.is_empty() {
            return;
        }
        log::trace!("merge {} nodes into {} nodes", other.len(), self.len());
        let mid = other.front_node();
        self.append(other);
        // SAFETY: after appending, `front..mid` holds the nodes of `self` and
        // `mid..ghost` those of `other`, both valid ranges.
        unsafe { merge_range(self.front_node(), mid, self.ghost_node(), &mut less) };
    }

    /// Reverse the order of the elements in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4]);
    /// list.reverse();
    /// assert_eq!(list.into_vec(), vec![4, 3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        log::trace!("reverse {} nodes", self.len());
        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            // SAFETY: every node of the cycle, ghost included, has its links
            // swapped exactly once.
            unsafe {
                let next = next_of(node);
                ptr::swap(
                    ptr::addr_of_mut!((*node.as_ptr()).next),
                    ptr::addr_of_mut!((*node.as_ptr()).prev),
                );
                node = next;
            }
            if node == ghost {
                break;
            }
        }
    }

    /// Remove consecutive repeated elements, keeping the first element of
    /// each run.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([1, 2, 2, 3, 3, 2, 1, 1, 2]);
    /// list.unique();
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 2, 1, 2]);
    /// ```
    pub fn unique(&mut self)
    where
        T: PartialEq,
    {
        self.unique_by(|a, b| a == b);
    }

    /// Remove consecutive elements for which `same(kept, next)` holds, where
    /// `kept` is the first element of the current run.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    ///
    /// let mut list = List::from([10, 11, 25, 29, 31, 12]);
    /// list.unique_by(|a, b| a / 10 == b / 10);
    /// assert_eq!(list.into_vec(), vec![10, 25, 31, 12]);
    /// ```
    pub fn unique_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.len() < 2 {
            return;
        }
        let ghost = self.ghost_node();
        let mut kept = self.front_node();
        let mut removed = 0_usize;
        loop {
            // SAFETY: `kept` is a non-ghost node of the list, and `next` is
            // checked against the ghost before being read or unlinked.
            unsafe {
                let next = next_of(kept);
                if next == ghost {
                    break;
                }
                if same(&(*kept.as_ptr()).value, &(*next.as_ptr()).value) {
                    drop(self.unlink(next));
                    removed += 1;
                } else {
                    kept = next;
                }
            }
        }
        if removed > 0 {
            log::trace!("unique removed {} nodes", removed);
        }
    }

    /// Sort the list in ascending order with a merge sort on the nodes.
    ///
    /// Every range of *n* nodes is split after its first *n* / 2 nodes, and
    /// the sorted halves are merged like [`List::merge`]: of two equal
    /// elements, the one from the later half comes first. Hence this sort
    /// is not stable.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time. No element
    /// is copied or reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    /// let mut list = List::from([5, 3, 4, 4, 4, 1, 9, 8]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.into_vec(), vec![1, 3, 4, 4, 4, 5, 8, 9]);
    /// ```
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        log::trace!("sort {} nodes", self.len());
        merge_sort(self, |a, b| a < b);
    }

    /// Sort the list with a comparator function.
    ///
    /// See [`List::sort`] for the order of equal elements.
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// For example, while [`f64`] doesn’t implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function
    /// when we know the list doesn’t contain a `NaN`.
    /// ```
    /// use seq_list::List;
    /// let mut floats = List::from([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(floats.into_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    /// let mut v = List::from([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v.to_vec(), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.to_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        log::trace!("sort {} nodes", self.len());
        merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the list with a key extraction function.
    ///
    /// *O*(*m* \* *n* \* log(*n*)) worst-case, where the key function
    /// is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_list::List;
    /// let mut v = List::from([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(v.into_vec(), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        log::trace!("sort {} nodes", self.len());
        merge_sort(self, |a, b| f(a).lt(&f(b)));
    }
}

#[cfg(test)]
mod tests {
    use crate::list::tests::{assert_well_formed, index_of, nth_position};
    use crate::List;
    use std::cmp::Ordering;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    /// An element ordered by `key` only, so that `tag` tells equal elements
    /// apart.
    #[derive(Debug, Clone, Copy)]
    pub(super) struct Tagged {
        pub(super) key: i32,
        pub(super) tag: usize,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    fn tags(list: &List<Tagged>) -> Vec<usize> {
        list.iter().map(|t| t.tag).collect()
    }

    #[test]
    fn merge_sorted_lists() {
        let mut list = List::from([1, 9999, 20000]);
        let mut other = List::from([500, 15000, 30000]);
        list.merge(&mut other);
        assert!(other.is_empty());
        assert_eq!(list.len(), 6);
        assert_eq!(list.to_vec(), vec![1, 500, 9999, 15000, 20000, 30000]);
        assert_well_formed(&list);
        assert_well_formed(&other);
    }

    #[test]
    fn merge_with_empty() {
        let mut list = List::from([1, 2]);
        list.merge(&mut List::new());
        assert_eq!(list.to_vec(), vec![1, 2]);

        let mut empty = List::new();
        let mut other = List::from([3, 4]);
        empty.merge(&mut other);
        assert_eq!(empty.to_vec(), vec![3, 4]);
        assert!(other.is_empty());
        assert_well_formed(&empty);
    }

    #[test]
    fn merge_ties_take_other_first() {
        let mut list = List::from([Tagged { key: 1, tag: 0 }]);
        let mut other = List::from([Tagged { key: 1, tag: 1 }]);
        list.merge(&mut other);
        assert_eq!(tags(&list), vec![1, 0]);

        let mut list = List::from([
            Tagged { key: 1, tag: 0 },
            Tagged { key: 2, tag: 1 },
            Tagged { key: 3, tag: 2 },
        ]);
        let mut other = List::from([Tagged { key: 2, tag: 3 }, Tagged { key: 3, tag: 4 }]);
        list.merge(&mut other);
        assert_eq!(tags(&list), vec![0, 3, 1, 4, 2]);
    }

    #[test]
    fn merge_keeps_positions() {
        let mut list = List::from([1, 4]);
        let mut other = List::from([2, 3]);
        let four = nth_position(&list, 1);
        let two = other.cursor_start().position();
        list.merge(&mut other);
        assert_eq!(index_of(&list, four), 3);
        assert_eq!(index_of(&list, two), 1);
        assert!(other.cursor_at(two).is_none());
    }

    #[test]
    fn sort_examples() {
        let mut list = List::from([5, 3, 4, 4, 4, 1, 9, 8]);
        list.sort();
        assert_eq!(list.to_vec(), vec![1, 3, 4, 4, 4, 5, 8, 9]);
        assert_well_formed(&list);

        let mut sorted = List::from_iter(0..20);
        sorted.sort();
        assert_eq!(sorted.to_vec(), Vec::from_iter(0..20));

        let mut reversed = List::from_iter((0..20).rev());
        reversed.sort();
        assert_eq!(reversed.to_vec(), Vec::from_iter(0..20));

        let mut single = List::from([7]);
        single.sort();
        assert_eq!(single.to_vec(), vec![7]);

        let mut empty: List<i32> = List::new();
        empty.sort();
        assert!(empty.is_empty());
        assert_well_formed(&empty);
    }

    #[test]
    fn sort_ties_follow_split_order() {
        // Two equal elements: the later half wins.
        let mut list = List::from([Tagged { key: 1, tag: 0 }, Tagged { key: 1, tag: 1 }]);
        list.sort();
        assert_eq!(tags(&list), vec![1, 0]);

        // [0 1 | 2 3 4] -> [1 0 | 4 3 2] -> merged right-first.
        let mut list: List<Tagged> = (0..5).map(|tag| Tagged { key: 0, tag }).collect();
        list.sort();
        assert_eq!(tags(&list), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn sort_by_and_key() {
        let mut list = List::from(["ccc", "a", "bb", "dddd"]);
        list.sort_by(|a, b| b.len().cmp(&a.len()));
        assert_eq!(list.to_vec(), vec!["dddd", "ccc", "bb", "a"]);
        list.sort_by_key(|s| s.len());
        assert_eq!(list.to_vec(), vec!["a", "bb", "ccc", "dddd"]);
    }

    #[test]
    fn sort_keeps_positions() {
        let mut list = List::from([3, 1, 2]);
        let three = list.cursor_start().position();
        list.sort();
        assert_eq!(list.cursor_at(three).unwrap().get(), Ok(&3));
        assert_eq!(index_of(&list, three), 2);
    }

    #[test]
    fn unique_examples() {
        let mut list = List::from([1, 2, 2, 3, 3, 2, 1, 1, 2]);
        list.unique();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 2, 1, 2]);
        assert_eq!(list.len(), 6);
        assert_well_formed(&list);

        let mut same = List::from([4, 4, 4, 4]);
        same.unique();
        assert_eq!(same.to_vec(), vec![4]);
        assert_well_formed(&same);
        assert_eq!(same.back(), Ok(&4));

        // Removing the last nodes must relink the ghost.
        let mut tail = List::from([1, 2, 2, 2]);
        tail.unique();
        assert_eq!(tail.back(), Ok(&2));
        tail.push_back(3);
        assert_eq!(tail.to_vec(), vec![1, 2, 3]);
        assert_well_formed(&tail);

        let mut empty: List<i32> = List::new();
        empty.unique();
        assert!(empty.is_empty());

        let mut runs = List::from([
            Tagged { key: 1, tag: 0 },
            Tagged { key: 1, tag: 1 },
            Tagged { key: 2, tag: 2 },
            Tagged { key: 2, tag: 3 },
        ]);
        runs.unique();
        assert_eq!(tags(&runs), vec![0, 2]);
    }

    #[test]
    fn reverse_examples() {
        let mut list = List::from_iter(0..5);
        list.reverse();
        assert_eq!(list.to_vec(), vec![4, 3, 2, 1, 0]);
        assert_well_formed(&list);
        list.push_back(-1);
        list.push_front(5);
        assert_eq!(list.to_vec(), vec![5, 4, 3, 2, 1, 0, -1]);

        let mut empty: List<i32> = List::new();
        empty.reverse();
        assert!(empty.is_empty());
        assert_well_formed(&empty);

        let mut single = List::from([1]);
        single.reverse();
        assert_eq!(single.to_vec(), vec![1]);
        assert_well_formed(&single);
    }

    #[test]
    fn clone_from_reuses_nodes() {
        let source = List::from([1, 2, 3]);

        let mut shorter = List::from([9]);
        let kept = shorter.cursor_start().position();
        shorter.clone_from(&source);
        assert_eq!(shorter, source);
        assert_eq!(index_of(&shorter, kept), 0);
        assert_well_formed(&shorter);

        let mut longer = List::from([9, 9, 9, 9, 9]);
        longer.clone_from(&source);
        assert_eq!(longer, source);
        assert_eq!(longer.len(), 3);
        assert_eq!(longer.back(), Ok(&3));
        assert_well_formed(&longer);

        let mut target = List::from([1]);
        target.clone_from(&List::new());
        assert!(target.is_empty());
    }

    #[test]
    fn compare_and_hash() {
        fn hash_of(list: &List<i32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        }
        let a = List::from([1, 2, 3]);
        let b = List::from([1, 2, 3]);
        let c = List::from([1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(a.contains(&2));
        assert!(!a.contains(&4));
    }
}

#[cfg(all(not(miri), test))]
mod proptests {
    use super::tests::Tagged;
    use crate::list::tests::{assert_well_formed, nth_position};
    use crate::List;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    fn tagged(keys: &[i32]) -> Vec<Tagged> {
        keys.iter()
            .enumerate()
            .map(|(tag, &key)| Tagged { key, tag })
            .collect()
    }

    /// A copying merge: the left element goes first only when strictly less.
    fn reference_merge(left: Vec<Tagged>, right: Vec<Tagged>) -> Vec<Tagged> {
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if left[i] < right[j] {
                merged.push(left[i]);
                i += 1;
            } else {
                merged.push(right[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    }

    fn reference_sort(values: &[Tagged]) -> Vec<Tagged> {
        if values.len() < 2 {
            return values.to_vec();
        }
        let (left, right) = values.split_at(values.len() / 2);
        reference_merge(reference_sort(left), reference_sort(right))
    }

    fn tags<'a>(values: impl IntoIterator<Item = &'a Tagged>) -> Vec<usize> {
        values.into_iter().map(|t| t.tag).collect()
    }

    #[derive(Debug, Clone)]
    enum Op {
        PushBack(i32),
        PushFront(i32),
        PopBack,
        PopFront,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<i32>().prop_map(Op::PushBack),
            any::<i32>().prop_map(Op::PushFront),
            Just(Op::PopBack),
            Just(Op::PopFront),
        ]
    }

    proptest! {
        #[test]
        fn push_pop_matches_vec_deque(ops in prop::collection::vec(op(), 0..100)) {
            let mut list = List::new();
            let mut model = VecDeque::new();
            for op in ops {
                match op {
                    Op::PushBack(x) => {
                        list.push_back(x);
                        model.push_back(x);
                    }
                    Op::PushFront(x) => {
                        list.push_front(x);
                        model.push_front(x);
                    }
                    Op::PopBack => prop_assert_eq!(list.pop_back().ok(), model.pop_back()),
                    Op::PopFront => prop_assert_eq!(list.pop_front().ok(), model.pop_front()),
                }
                prop_assert_eq!(list.len(), model.len());
                prop_assert_eq!(list.front().ok(), model.front());
                prop_assert_eq!(list.back().ok(), model.back());
            }
            prop_assert!(list.iter().eq(model.iter()));
            assert_well_formed(&list);
        }

        #[test]
        fn sort_matches_copying_merge_sort(keys in prop::collection::vec(0..8i32, 0..64)) {
            let values = tagged(&keys);
            let mut list = List::from(values.clone());
            list.sort();
            prop_assert_eq!(tags(&list), tags(&reference_sort(&values)));
            assert_well_formed(&list);
        }

        #[test]
        fn sort_matches_vec(mut values in prop::collection::vec(any::<i64>(), 0..100)) {
            let mut list = List::from(values.clone());
            list.sort();
            values.sort();
            prop_assert_eq!(list.into_vec(), values);
        }

        #[test]
        fn merge_matches_copying_merge(
            mut left in prop::collection::vec(0..8i32, 0..32),
            mut right in prop::collection::vec(0..8i32, 0..32),
        ) {
            left.sort();
            right.sort();
            let left = tagged(&left);
            let right: Vec<Tagged> = tagged(&right)
                .into_iter()
                .map(|t| Tagged { tag: t.tag + left.len(), ..t })
                .collect();
            let mut list = List::from(left.clone());
            let mut other = List::from(right.clone());
            list.merge(&mut other);
            prop_assert!(other.is_empty());
            prop_assert_eq!(tags(&list), tags(&reference_merge(left, right)));
            assert_well_formed(&list);
        }

        #[test]
        fn unique_matches_dedup(mut values in prop::collection::vec(0..4u8, 0..64)) {
            let mut list = List::from(values.clone());
            list.unique();
            values.dedup();
            assert_well_formed(&list);
            prop_assert_eq!(list.len(), values.len());
            prop_assert_eq!(list.back().ok(), values.last());
            prop_assert_eq!(list.into_vec(), values);
        }

        #[test]
        fn reverse_matches_vec(mut values in prop::collection::vec(any::<u16>(), 0..64)) {
            let mut list = List::from(values.clone());
            list.reverse();
            values.reverse();
            assert_well_formed(&list);
            prop_assert_eq!(list.into_vec(), values);
        }

        #[test]
        fn splice_matches_vec(
            values in prop::collection::vec(any::<u8>(), 0..32),
            inserted in prop::collection::vec(any::<u8>(), 0..32),
            at in any::<prop::sample::Index>(),
        ) {
            let at = at.index(values.len() + 1);
            let mut list = List::from(values.clone());
            let mut other = List::from(inserted.clone());
            let pos = nth_position(&list, at);
            prop_assert!(list.splice(pos, &mut other).is_ok());

            let mut expected = values;
            expected.splice(at..at, inserted);
            prop_assert!(other.is_empty());
            prop_assert_eq!(list.len(), expected.len());
            assert_well_formed(&list);
            prop_assert_eq!(list.into_vec(), expected);
        }
    }
}
