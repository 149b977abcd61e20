//! Multi-level ordering: stability, composability, deferral.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use seqops::comparer::{FloatOrder, IgnoreAsciiCase, NaturalOrder, Nullable, SortDirection};
use seqops::operators::sort::{BoxedLevel, SortLevel};
use seqops::{OrderedSequence, SequenceExt};

#[test]
fn test_name_then_age() {
    let people = vec![("Kim", 30), ("Lee", 25), ("Kim", 20), ("Lee", 35)];
    let sorted: Vec<(&str, i32)> = people
        .into_iter()
        .order_by(|p| p.0)
        .then_by(|p| p.1)
        .into_iter()
        .collect();
    assert_eq!(sorted, vec![("Kim", 20), ("Kim", 30), ("Lee", 25), ("Lee", 35)]);
}

#[test]
fn test_stability_on_full_ties() {
    // key ignores the tag, so equal keys must keep source order
    let items: Vec<(u8, usize)> = (0..100).map(|i| ((i * 7 % 5) as u8, i)).collect();
    let sorted: Vec<(u8, usize)> = items.iter().copied().order_by(|p| p.0).into_iter().collect();
    for w in sorted.windows(2) {
        assert!(w[0].0 <= w[1].0);
        if w[0].0 == w[1].0 {
            assert!(w[0].1 < w[1].1, "tie reordered: {:?}", w);
        }
    }
}

#[test]
fn test_stability_with_descending_level() {
    let items = vec![("b", 1), ("a", 2), ("b", 3), ("a", 4), ("c", 5)];
    let sorted: Vec<i32> = items
        .into_iter()
        .order_by_descending(|p| p.0)
        .into_iter()
        .map(|p| p.1)
        .collect();
    // descending negates the key comparison, not the tie-break
    assert_eq!(sorted, vec![5, 1, 3, 2, 4]);
}

#[test]
fn test_then_by_matches_single_composite_comparator() {
    let rows: Vec<(u32, i64, String)> = (0..64u32)
        .map(|i| (i % 4, ((i * 13) % 7) as i64, format!("r{}", (i * 31) % 11)))
        .collect();

    let chained: Vec<_> = rows
        .iter()
        .cloned()
        .order_by(|r| r.0)
        .then_by_descending(|r| r.1)
        .then_by(|r| r.2.clone())
        .into_iter()
        .collect();

    let mut composite = rows.clone();
    composite.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.cmp(&b.2))
    });
    assert_eq!(chained, composite);
}

#[test]
fn test_custom_and_closure_comparers() {
    let words = vec!["delta", "Alpha", "charlie", "Bravo"];
    let ci: Vec<&str> = words
        .iter()
        .copied()
        .order_by_with(|w| w.to_string(), IgnoreAsciiCase, SortDirection::Ascending)
        .into_iter()
        .collect();
    assert_eq!(ci, vec!["Alpha", "Bravo", "charlie", "delta"]);

    let by_last_char: Vec<&str> = words
        .iter()
        .copied()
        .order_by_with(
            |w| w.chars().last().unwrap_or(' '),
            |a: &char, b: &char| a.cmp(b),
            SortDirection::Descending,
        )
        .into_iter()
        .collect();
    assert_eq!(by_last_char, vec!["Bravo", "charlie", "delta", "Alpha"]);
}

#[test]
fn test_float_and_nullable_keys() {
    let xs = vec![2.5f64, f64::NAN, -1.0, 0.0];
    let sorted: Vec<f64> = xs
        .iter()
        .copied()
        .order_by_with(|x| *x, FloatOrder, SortDirection::Ascending)
        .into_iter()
        .collect();
    assert_eq!(&sorted[..3], &[-1.0, 0.0, 2.5]);
    assert!(sorted[3].is_nan());

    let opt = vec![Some(3), None, Some(1)];
    let sorted: Vec<Option<i32>> = opt
        .into_iter()
        .order_by_with(|x| *x, Nullable(NaturalOrder), SortDirection::Ascending)
        .into_iter()
        .collect();
    assert_eq!(sorted, vec![None, Some(1), Some(3)]);
}

#[test]
fn test_recomputed_per_enumeration() {
    let calls = Cell::new(0);
    let ordered = vec![3, 1, 2].into_iter().order_by(|x| {
        calls.set(calls.get() + 1);
        *x
    });
    assert_eq!(calls.get(), 0);

    let a: Vec<i32> = ordered.iter().collect();
    let b: Vec<i32> = ordered.iter().collect();
    assert_eq!(a, vec![1, 2, 3]);
    assert_eq!(a, b);
    assert_eq!(calls.get(), 6);
}

#[test]
fn test_single_threaded_selectors_and_comparers() {
    let rank: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(vec!["low", "mid", "high"]));
    let seen = Rc::new(Cell::new(0usize));
    let position = {
        let rank = Rc::clone(&rank);
        let seen = Rc::clone(&seen);
        move |s: &&str| {
            seen.set(seen.get() + 1);
            rank.borrow().iter().position(|r| r == s)
        }
    };
    let ordered = vec!["high", "low", "mid", "low"]
        .into_iter()
        .order_by_with(position, |a: &Option<usize>, b: &Option<usize>| b.cmp(a), SortDirection::Ascending);
    let out: Vec<&str> = ordered.iter().collect();
    assert_eq!(out, vec!["high", "mid", "low", "low"]);
    assert_eq!(seen.get(), 4);

    rank.borrow_mut().reverse();
    let out: Vec<&str> = ordered.iter().collect();
    assert_eq!(out, vec!["low", "low", "mid", "high"]);
}

#[test]
fn test_sorted_is_exact_size_and_lazy_to_consume() {
    let ordered = (0..10).rev().order_by(|x| *x);
    let mut it = ordered.into_iter();
    assert_eq!(it.len(), 10);
    assert_eq!(it.next(), Some(0));
    assert_eq!(it.len(), 9);
    assert_eq!(it.permutation()[0], 9);
}

#[test]
fn test_prebuilt_level_chain() {
    let levels: Vec<BoxedLevel<'static, (i32, i32)>> = vec![
        Box::new(SortLevel::new(|p: &(i32, i32)| p.1, NaturalOrder, SortDirection::Descending)),
        Box::new(SortLevel::new(|p: &(i32, i32)| p.0, NaturalOrder, SortDirection::Ascending)),
    ];
    let ordered = OrderedSequence::from_levels(vec![(2, 1), (1, 1), (0, 5)].into_iter(), levels).unwrap();
    assert_eq!(ordered.level_count(), 2);
    assert_eq!(
        ordered.directions().collect::<Vec<_>>(),
        vec![SortDirection::Descending, SortDirection::Ascending]
    );
    assert_eq!(ordered.permutation(), vec![2, 1, 0]);
}

#[test]
fn test_middle_pivot_handles_adversarial_shapes() {
    // sorted, reversed, organ-pipe, all-equal: correctness only
    let n = 500usize;
    let shapes: Vec<Vec<usize>> = vec![
        (0..n).collect(),
        (0..n).rev().collect(),
        (0..n / 2).chain((0..n / 2).rev()).collect(),
        vec![7; n],
    ];
    for shape in shapes {
        let sorted: Vec<usize> = shape.iter().copied().order_by(|x| *x).into_iter().collect();
        let mut expected = shape.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}

#[test]
fn test_reverse_then_order() {
    let out: Vec<i32> = vec![1, 2, 3, 4]
        .into_iter()
        .reversed()
        .collect::<Vec<_>>()
        .into_iter()
        .order_by_with(|x| *x % 2, |a: &i32, b: &i32| a.cmp(b), SortDirection::Ascending)
        .into_iter()
        .collect();
    assert_eq!(out, vec![4, 2, 3, 1]);
}
