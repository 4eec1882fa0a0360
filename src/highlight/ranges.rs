//! Interval merging for highlight ranges.

/// A half-open `[start, end)` range of byte offsets into a text buffer.
///
/// Intervals are not validated: `start > end` is allowed and simply
/// covers nothing once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
    /// Optional style tag looked up in [`crate::ui::style::HighlightStyle`].
    pub class: Option<String>,
}

impl Interval {
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            class: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<(usize, usize)> for Interval {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<std::ops::Range<usize>> for Interval {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Merge intervals into a sorted, pairwise non-overlapping sequence.
///
/// Touching intervals (`a.end == b.start`) are merged too. When two
/// intervals merge, the earlier one keeps its class.
///
/// # Example
///
/// ```
/// use mde::highlight::{merge, Interval};
///
/// let merged = merge([(5, 10), (1, 3), (8, 12)].map(Interval::from));
/// assert_eq!(merged, vec![Interval::new(1, 3), Interval::new(5, 12)]);
/// ```
pub fn merge(ranges: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut ranges: Vec<Interval> = ranges.into_iter().collect();
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_unstable_by_key(|range| range.start);

    let mut stack: Vec<Interval> = Vec::with_capacity(ranges.len());
    for range in ranges {
        let Some(top) = stack.last_mut() else {
            stack.push(range);
            continue;
        };
        if top.end < range.start {
            stack.push(range);
        } else if top.end < range.end {
            top.end = range.end;
        }
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(usize, usize)]) -> Vec<Interval> {
        list.iter().copied().map(Interval::from).collect()
    }

    fn bounds(list: &[Interval]) -> Vec<(usize, usize)> {
        list.iter().map(|i| (i.start, i.end)).collect()
    }

    #[test]
    fn test_merge_empty_is_empty() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_sorts_and_joins_overlaps() {
        let merged = merge(pairs(&[(5, 10), (1, 3), (8, 12)]));
        assert_eq!(bounds(&merged), vec![(1, 3), (5, 12)]);
    }

    #[test]
    fn test_merge_discards_contained_range() {
        let merged = merge(pairs(&[(0, 5), (2, 4)]));
        assert_eq!(bounds(&merged), vec![(0, 5)]);
    }

    #[test]
    fn test_merge_joins_touching_ranges() {
        let merged = merge(pairs(&[(0, 5), (5, 8)]));
        assert_eq!(bounds(&merged), vec![(0, 8)]);
    }

    #[test]
    fn test_merge_keeps_class_of_earlier_range() {
        let merged = merge(vec![
            Interval::new(4, 9).with_class("late"),
            Interval::new(0, 5).with_class("early"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].class.as_deref(), Some("early"));
        assert_eq!((merged[0].start, merged[0].end), (0, 9));
    }

    #[test]
    fn test_merge_accepts_inverted_range() {
        let merged = merge(pairs(&[(6, 2), (3, 4)]));
        assert_eq!(bounds(&merged), vec![(3, 4), (6, 2)]);
    }

    #[test]
    fn test_interval_len_saturates_for_inverted() {
        assert_eq!(Interval::new(6, 2).len(), 0);
        assert!(Interval::new(6, 2).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coverage(list: &[Interval], limit: usize) -> Vec<bool> {
            let mut covered = vec![false; limit];
            for range in list {
                for slot in covered
                    .iter_mut()
                    .take(range.end.min(limit))
                    .skip(range.start)
                {
                    *slot = true;
                }
            }
            covered
        }

        fn well_formed() -> impl Strategy<Value = Vec<Interval>> {
            prop::collection::vec(
                (0..200usize, 0..40usize).prop_map(|(start, len)| Interval::new(start, start + len)),
                0..40,
            )
        }

        proptest! {
            #[test]
            fn merged_is_sorted_and_disjoint(input in well_formed()) {
                let merged = merge(input);
                for pair in merged.windows(2) {
                    prop_assert!(pair[0].start <= pair[1].start);
                    prop_assert!(pair[0].end < pair[1].start);
                }
            }

            #[test]
            fn merged_covers_same_offsets(input in well_formed()) {
                let merged = merge(input.clone());
                prop_assert_eq!(coverage(&merged, 260), coverage(&input, 260));
            }

            #[test]
            fn merge_is_idempotent(input in well_formed()) {
                let once = merge(input);
                let twice = merge(once.clone());
                prop_assert_eq!(once, twice);
            }
        }
    }
}
