//! Property-based tests for the lazy segment tree, checked against a plain `Vec`.

use lazyseg::groups::{FnSemigroup, Max, NumAdditiveGroups};
use lazyseg::{Error, LazySegmentTree, OperationId};
use proptest::prelude::*;

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Clone, Debug)]
enum RangeOp {
    Add { at: usize, span: usize, x: i64 },
    Assign { at: usize, span: usize, x: i64 },
    Query { at: usize, span: usize },
}

fn arbitrary_range_op() -> impl Strategy<Value = RangeOp> {
    prop_oneof![
        (any::<usize>(), any::<usize>(), -100i64..100)
            .prop_map(|(at, span, x)| RangeOp::Add { at, span, x }),
        (any::<usize>(), any::<usize>(), -100i64..100)
            .prop_map(|(at, span, x)| RangeOp::Assign { at, span, x }),
        (any::<usize>(), any::<usize>()).prop_map(|(at, span)| RangeOp::Query { at, span }),
    ]
}

/// Maps two arbitrary numbers onto a non-empty range inside `0..len`.
fn to_range(at: usize, span: usize, len: usize) -> (usize, usize) {
    let begin = at % len;
    let end = begin + 1 + span % (len - begin);
    (begin, end)
}

struct SumHarness {
    tree: LazySegmentTree<NumAdditiveGroups<i64>>,
    add: OperationId,
    assign: OperationId,
}

impl SumHarness {
    fn new(values: &[i64]) -> Self {
        let mut tree: LazySegmentTree<NumAdditiveGroups<i64>> =
            LazySegmentTree::new(NumAdditiveGroups::new(), values.iter().copied());
        let add = tree.add_operation(|sum, x, b, e| sum + x * (e - b) as i64);
        let assign = tree.add_operation(|_, x, b, e| x * (e - b) as i64);
        Self { tree, add, assign }
    }
}

// =============================================================================
// Fold properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A fresh tree answers every range with the direct fold of the input.
    #[test]
    fn fresh_sum_matches_direct_fold(
        values in prop::collection::vec(-1000i64..1000, 1..64),
        at in any::<usize>(),
        span in any::<usize>(),
    ) {
        let mut h = SumHarness::new(&values);
        let (b, e) = to_range(at, span, values.len());
        prop_assert_eq!(h.tree.query(b, e), Ok(values[b..e].iter().sum::<i64>()));
    }

    #[test]
    fn fresh_max_matches_direct_fold(
        values in prop::collection::vec(any::<i32>(), 1..64),
        at in any::<usize>(),
        span in any::<usize>(),
    ) {
        let mut tree: LazySegmentTree<Max<i32>> =
            LazySegmentTree::new(Max::new(), values.iter().copied());
        let (b, e) = to_range(at, span, values.len());
        prop_assert_eq!(tree.query(b, e), Ok(*values[b..e].iter().max().unwrap()));
    }

    /// Concatenation is associative but not commutative, so this pins down
    /// left-to-right combination order.
    #[test]
    fn fresh_concat_keeps_order(
        words in prop::collection::vec("[a-z]{0,3}", 1..32),
        at in any::<usize>(),
        span in any::<usize>(),
    ) {
        let concat = FnSemigroup::new(|a: String, b: String| a + &b);
        let mut tree: LazySegmentTree<_, ()> = LazySegmentTree::new(concat, words.clone());
        let (b, e) = to_range(at, span, words.len());
        prop_assert_eq!(tree.query(b, e), Ok(words[b..e].concat()));
    }
}

// =============================================================================
// Update properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any interleaving of range adds, range assigns and queries agrees with
    /// mutating a reference array directly.
    #[test]
    fn updates_match_reference_array(
        values in prop::collection::vec(-1000i64..1000, 1..48),
        ops in prop::collection::vec(arbitrary_range_op(), 1..64),
    ) {
        let mut naive = values.clone();
        let mut h = SumHarness::new(&values);
        let len = values.len();

        for op in &ops {
            match *op {
                RangeOp::Add { at, span, x } => {
                    let (b, e) = to_range(at, span, len);
                    prop_assert_eq!(h.tree.update(b, e, h.add, x), Ok(()));
                    naive[b..e].iter_mut().for_each(|v| *v += x);
                }
                RangeOp::Assign { at, span, x } => {
                    let (b, e) = to_range(at, span, len);
                    prop_assert_eq!(h.tree.update(b, e, h.assign, x), Ok(()));
                    naive[b..e].iter_mut().for_each(|v| *v = x);
                }
                RangeOp::Query { at, span } => {
                    let (b, e) = to_range(at, span, len);
                    prop_assert_eq!(h.tree.query(b, e), Ok(naive[b..e].iter().sum::<i64>()));
                }
            }
        }

        for (i, &v) in naive.iter().enumerate() {
            prop_assert_eq!(h.tree.get(i), Ok(v));
        }
    }

    /// Range add distributes over max, so lazy tags work there as well.
    #[test]
    fn max_with_range_add_matches_reference(
        values in prop::collection::vec(-1000i32..1000, 1..48),
        ops in prop::collection::vec((any::<usize>(), any::<usize>(), -100i32..100), 1..64),
    ) {
        let mut naive = values.clone();
        let mut tree: LazySegmentTree<Max<i32>> =
            LazySegmentTree::new(Max::new(), values.iter().copied());
        let add = tree.add_operation(|max, x, _, _| max + x);
        let len = values.len();

        for &(at, span, x) in &ops {
            let (b, e) = to_range(at, span, len);
            tree.update(b, e, add, x).unwrap();
            naive[b..e].iter_mut().for_each(|v| *v += x);

            let (qb, qe) = to_range(span, at, len);
            prop_assert_eq!(tree.query(qb, qe), Ok(*naive[qb..qe].iter().max().unwrap()));
        }
    }

    /// A copy diverges from its source once either side is updated.
    #[test]
    fn clones_do_not_share_nodes(
        values in prop::collection::vec(-1000i64..1000, 1..32),
        at in any::<usize>(),
        span in any::<usize>(),
        x in 1i64..100,
    ) {
        let mut h = SumHarness::new(&values);
        let total: i64 = values.iter().sum();
        let (b, e) = to_range(at, span, values.len());
        h.tree.update(0, values.len(), h.add, 1).unwrap();

        let mut copy = h.tree.clone();
        copy.update(b, e, h.add, x).unwrap();

        let len = values.len() as i64;
        prop_assert_eq!(h.tree.query(0, values.len()), Ok(total + len));
        prop_assert_eq!(
            copy.query(0, values.len()),
            Ok(total + len + x * (e - b) as i64)
        );
    }
}

// =============================================================================
// Rejection properties
// =============================================================================

proptest! {
    #[test]
    fn out_of_bounds_ranges_are_rejected(
        values in prop::collection::vec(-1000i64..1000, 1..32),
        begin in 0usize..64,
        end in 0usize..64,
    ) {
        let mut h = SumHarness::new(&values);
        let len = values.len();
        prop_assume!(begin >= end || end > len);

        let err = Error::InvalidRange { begin, end, len };
        prop_assert_eq!(h.tree.query(begin, end), Err(err));
        prop_assert_eq!(h.tree.update(begin, end, h.add, 1), Err(err));
        prop_assert_eq!(h.tree.query(0, len), Ok(values.iter().sum::<i64>()));
    }
}
