//! Behavior tests for sequence combinators.
//!
//! Covers the per-combinator pull semantics, completion latching and the
//! error paths raised at construction or from within `next()`.

use std::cell::Cell;
use std::rc::Rc;

use lazyseq::Error;
use lazyseq::sequence::{Kind, Sequence, counter, generate, iterate, range, range_step};
use rstest::rstest;

fn is_odd(value: &i64) -> bool {
    value % 2 == 1
}

// =============================================================================
// Scenarios
// =============================================================================

#[rstest]
fn filter_odd_values_from_array() {
    let odd = iterate(vec![1_i64, 2, 3, 4, 5, 6, 7, 8, 9, 10])
        .filter(is_odd)
        .to_array()
        .unwrap();
    assert_eq!(odd, vec![1, 3, 5, 7, 9]);
}

#[rstest]
#[case(1, 10, 2, vec![1, 3, 5, 7, 9])]
#[case(10, 1, -3, vec![10, 7, 4, 1])]
#[case(1, 1, 1, vec![1])]
#[case(5, 1, 1, vec![])]
#[case(1, 5, -1, vec![])]
fn range_with_step(
    #[case] start: i64,
    #[case] stop: i64,
    #[case] step: i64,
    #[case] expected: Vec<i64>,
) {
    assert_eq!(range_step(start, stop, step).unwrap().to_array().unwrap(), expected);
}

#[rstest]
#[case(vec![1, 2, 3], 2, vec![2, 3])]
#[case(vec![1], 5, vec![1])]
#[case(vec![], 3, vec![])]
#[case(vec![1, 2, 3], 0, vec![])]
fn take_last_keeps_final_values(
    #[case] input: Vec<i32>,
    #[case] count: usize,
    #[case] expected: Vec<i32>,
) {
    assert_eq!(iterate(input).take_last(count).to_array().unwrap(), expected);
}

#[rstest]
fn counter_take_five() {
    assert_eq!(counter().take(5).to_array().unwrap(), vec![1, 2, 3, 4, 5]);
}

// =============================================================================
// Completion latching
// =============================================================================

#[rstest]
fn completion_is_only_known_after_exhausting_pull() {
    let mut sequence = iterate(vec![1, 2]);
    assert!(!sequence.is_complete());
    assert_eq!(sequence.next().unwrap(), Some(1));
    assert_eq!(sequence.next().unwrap(), Some(2));
    assert!(!sequence.is_complete());
    assert_eq!(sequence.next().unwrap(), None);
    assert!(sequence.is_complete());
}

#[rstest]
fn exhausted_pipeline_keeps_returning_none() {
    let mut sequence = iterate(vec![1, 2, 3]).map(|value| value * 2).take(2);
    assert_eq!(sequence.next().unwrap(), Some(2));
    assert_eq!(sequence.next().unwrap(), Some(4));
    for _ in 0..3 {
        assert_eq!(sequence.next().unwrap(), None);
        assert!(sequence.is_complete());
    }
}

#[rstest]
fn exhausted_generator_is_not_resumed() {
    let pulls = Rc::new(Cell::new(0));
    let counted = Rc::clone(&pulls);
    let mut sequence = generate(std::iter::from_fn(move || {
        counted.set(counted.get() + 1);
        (counted.get() <= 2).then_some(counted.get())
    }));

    assert_eq!(sequence.next().unwrap(), Some(1));
    assert_eq!(sequence.next().unwrap(), Some(2));
    assert_eq!(sequence.next().unwrap(), None);
    assert_eq!(sequence.next().unwrap(), None);
    assert_eq!(pulls.get(), 3);
}

// =============================================================================
// filter / map
// =============================================================================

#[rstest]
fn filter_with_nothing_passing_is_empty() {
    let mut sequence = range(1, 5).filter(|value| *value > 10);
    assert_eq!(sequence.next().unwrap(), None);
    assert!(sequence.is_complete());
}

#[rstest]
fn map_applies_to_every_value() {
    let labels = iterate(vec![1, 2, 3])
        .map(|value| format!("#{value}"))
        .to_array()
        .unwrap();
    assert_eq!(labels, vec!["#1", "#2", "#3"]);
}

#[rstest]
fn try_map_reports_missing_value_at_its_position() {
    let mut sequence =
        range(1, 5).try_map(|value| Ok(if value == 3 { None } else { Some(value * 10) }));
    assert_eq!(sequence.next().unwrap(), Some(10));
    assert_eq!(sequence.next().unwrap(), Some(20));
    let error = sequence.next().unwrap_err();
    assert!(matches!(
        error,
        Error::NoValueProduced {
            operation: "try_map",
            position: 3
        }
    ));
    assert!(!sequence.is_complete());
    assert_eq!(sequence.next().unwrap(), Some(40));
}

#[rstest]
fn try_filter_propagates_callback_errors() {
    let mut sequence = range(1, 3).try_filter(|value| {
        if *value == 2 {
            Err(Error::callback(std::io::Error::other("bad value")))
        } else {
            Ok(true)
        }
    });
    assert_eq!(sequence.next().unwrap(), Some(1));
    let error = sequence.next().unwrap_err();
    assert_eq!(error.to_string(), "bad value");
    assert_eq!(sequence.next().unwrap(), Some(3));
}

// =============================================================================
// take / take_while
// =============================================================================

#[rstest]
fn take_zero_never_pulls_upstream() {
    let pulled = Rc::new(Cell::new(false));
    let flag = Rc::clone(&pulled);
    let mut sequence = counter()
        .map(move |value| {
            flag.set(true);
            value
        })
        .take(0);
    assert_eq!(sequence.next().unwrap(), None);
    assert!(!pulled.get());
}

#[rstest]
fn take_more_than_available() {
    assert_eq!(range(1, 3).take(10).to_array().unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn take_while_yields_first_failing_value_then_ends() {
    let mut sequence = iterate(vec![1, 2, 7, 3]).take_while(|value| *value < 5);
    assert_eq!(sequence.next().unwrap(), Some(1));
    assert_eq!(sequence.next().unwrap(), Some(2));
    assert_eq!(sequence.next().unwrap(), Some(7));
    assert!(!sequence.is_complete());
    assert_eq!(sequence.next().unwrap(), None);
    assert!(sequence.is_complete());
}

#[rstest]
fn take_while_on_infinite_counter_terminates() {
    let values = counter().take_while(|value| value * value < 20).to_array().unwrap();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
}

// =============================================================================
// skip / skip_while / every
// =============================================================================

#[rstest]
#[case(0, vec![1, 2, 3, 4])]
#[case(2, vec![3, 4])]
#[case(4, vec![])]
#[case(9, vec![])]
fn skip_discards_leading_values(#[case] count: usize, #[case] expected: Vec<i32>) {
    assert_eq!(iterate(vec![1, 2, 3, 4]).skip(count).to_array().unwrap(), expected);
}

#[rstest]
fn skip_while_stops_testing_after_first_failure() {
    let tested = Rc::new(Cell::new(0));
    let counter_cell = Rc::clone(&tested);
    let values = iterate(vec![1, 2, 5, 1, 2])
        .skip_while(move |value| {
            counter_cell.set(counter_cell.get() + 1);
            *value < 3
        })
        .to_array()
        .unwrap();
    assert_eq!(values, vec![5, 1, 2]);
    assert_eq!(tested.get(), 3);
}

#[rstest]
#[case(1, vec![1, 2, 3, 4, 5, 6, 7])]
#[case(2, vec![1, 3, 5, 7])]
#[case(3, vec![1, 4, 7])]
#[case(10, vec![1])]
fn every_yields_first_then_each_step(#[case] step: usize, #[case] expected: Vec<i64>) {
    assert_eq!(range(1, 7).every(step).unwrap().to_array().unwrap(), expected);
}

#[rstest]
fn every_zero_is_rejected_at_construction() {
    let result = range(1, 7).every(0);
    assert!(matches!(
        result,
        Err(Error::InvalidArgument {
            operation: "every",
            ..
        })
    ));
}

#[rstest]
fn zero_step_range_is_rejected_at_construction() {
    assert!(matches!(
        range_step(1, 10, 0),
        Err(Error::InvalidArgument {
            operation: "range",
            ..
        })
    ));
}

// =============================================================================
// zip / packed_zip / concat / enumerate
// =============================================================================

#[rstest]
fn zip_ends_with_primary_even_when_secondary_has_more() {
    let pairs = iterate(vec![1, 2]).zip(counter()).to_array().unwrap();
    assert_eq!(pairs, vec![(1, Some(1)), (2, Some(2))]);
}

#[rstest]
fn zip_pads_when_secondary_runs_out() {
    let pairs = iterate(vec!['a', 'b', 'c']).zip(vec![true]).to_array().unwrap();
    assert_eq!(pairs, vec![('a', Some(true)), ('b', None), ('c', None)]);
}

#[rstest]
fn zip_does_not_pull_secondary_after_primary_ends() {
    let mut secondary_pulls = 0;
    let secondary = generate(std::iter::from_fn(|| {
        secondary_pulls += 1;
        Some(secondary_pulls)
    }));
    let count = iterate(vec![10, 20, 30]).zip(secondary).count().unwrap();
    assert_eq!(count, 3);
    assert_eq!(secondary_pulls, 3);
}

#[rstest]
fn packed_zip_stops_at_shorter() {
    let pairs = counter().packed_zip(vec!["x", "y"]).to_array().unwrap();
    assert_eq!(pairs, vec![(1, "x"), (2, "y")]);
}

#[rstest]
fn concat_exhausts_first_then_second() {
    let values = range(1, 3).concat(range(7, 8)).to_array().unwrap();
    assert_eq!(values, vec![1, 2, 3, 7, 8]);
}

#[rstest]
fn concat_with_empty_sides() {
    assert_eq!(iterate(Vec::<i32>::new()).concat(vec![1]).to_array().unwrap(), vec![1]);
    assert_eq!(iterate(vec![1]).concat(Vec::<i32>::new()).to_array().unwrap(), vec![1]);
}

#[rstest]
fn enumerate_is_one_based() {
    let indexed = iterate(vec!["a", "b"]).enumerate().to_array().unwrap();
    assert_eq!(indexed, vec![(1, "a"), (2, "b")]);
}

// =============================================================================
// Kinds and boxing
// =============================================================================

#[rstest]
fn kind_reports_outermost_combinator() {
    assert_eq!(iterate(vec![1]).kind(), Kind::Array);
    assert_eq!(range(1, 2).kind(), Kind::Range);
    assert_eq!(counter().kind(), Kind::Counter);
    assert_eq!(counter().take(1).kind(), Kind::Take);
    assert_eq!(counter().map(|value| value + 1).kind(), Kind::Map);
    assert_eq!(counter().zip(counter()).kind(), Kind::Zip);
}

#[rstest]
fn boxed_pipelines_share_one_type() {
    let pipelines: Vec<lazyseq::sequence::Boxed<'_, i64>> = vec![
        range(1, 3).boxed(),
        counter().filter(is_odd).take(2).boxed(),
        iterate(vec![9_i64]).boxed(),
    ];
    let results: Vec<Vec<i64>> = pipelines
        .into_iter()
        .map(|pipeline| pipeline.to_array().unwrap())
        .collect();
    assert_eq!(results, vec![vec![1, 2, 3], vec![1, 3], vec![9]]);
}

#[rstest]
fn boxed_kind_is_inner_kind() {
    assert_eq!(counter().skip(1).boxed().kind(), Kind::Skip);
}
