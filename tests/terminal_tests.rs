//! Tests for terminal operations: folds, searches, counting and conversion
//! back into standard iterators.

use std::cell::Cell;

use lazyseq::Error;
use lazyseq::sequence::{Sequence, counter, generate, iterate, range, try_generate};
use rstest::rstest;

// =============================================================================
// foreach
// =============================================================================

#[rstest]
fn foreach_visits_values_in_order() {
    let mut seen = Vec::new();
    iterate(vec!['a', 'b', 'c']).foreach(|value| seen.push(value)).unwrap();
    assert_eq!(seen, vec!['a', 'b', 'c']);
}

#[rstest]
fn foreach_over_tuples() {
    let mut seen = Vec::new();
    range(1, 2)
        .zip(vec!["one", "two"])
        .foreach(|(number, name)| seen.push(format!("{number}:{}", name.unwrap_or("?"))))
        .unwrap();
    assert_eq!(seen, vec!["1:one", "2:two"]);
}

#[rstest]
fn try_foreach_stops_at_first_error() {
    let mut seen = Vec::new();
    let result = range(1, 5).try_foreach(|value| {
        if value == 3 {
            return Err(Error::callback(std::fmt::Error));
        }
        seen.push(value);
        Ok(())
    });
    assert!(result.is_err());
    assert_eq!(seen, vec![1, 2]);
}

// =============================================================================
// reduce
// =============================================================================

#[rstest]
fn reduce_folds_left_to_right() {
    let joined = iterate(vec!["a", "b", "c"])
        .reduce(String::new(), |mut text, value| {
            text.push_str(value);
            text
        })
        .unwrap();
    assert_eq!(joined, "abc");
}

#[rstest]
fn reduce_on_empty_returns_initial() {
    assert_eq!(iterate(Vec::<i32>::new()).reduce(42, |total, value| total + value).unwrap(), 42);
}

#[rstest]
fn reduce_first_uses_first_value_as_seed() {
    let maximum = iterate(vec![3, 9, 4]).reduce_first(i32::max).unwrap();
    assert_eq!(maximum, Some(9));
}

#[rstest]
fn reduce_first_on_empty_is_none() {
    assert_eq!(iterate(Vec::<i32>::new()).reduce_first(i32::max).unwrap(), None);
}

#[rstest]
fn try_reduce_propagates_reducer_errors() {
    let mut folded = Vec::new();
    let result = range(1, 10).try_reduce(0_i64, |total, value| {
        let next = total + value;
        if next >= 10 {
            return Err(Error::callback(std::fmt::Error));
        }
        folded.push(next);
        Ok(next)
    });
    assert!(result.is_err());
    assert_eq!(folded, vec![1, 3, 6]);
}

#[rstest]
fn reduce_propagates_upstream_errors() {
    let producer = vec![Ok(1), Err(Error::callback(std::fmt::Error))];
    let result = try_generate(producer).reduce(0, |total, value| total + value);
    assert!(matches!(result, Err(Error::Callback(_))));
}

// =============================================================================
// any / all
// =============================================================================

#[rstest]
#[case(vec![], false)]
#[case(vec![None, Some(false)], false)]
#[case(vec![None, Some(true)], true)]
fn any_uses_truthiness(#[case] values: Vec<Option<bool>>, #[case] expected: bool) {
    assert_eq!(iterate(values).any().unwrap(), expected);
}

#[rstest]
#[case(vec![], true)]
#[case(vec![Some(1), Some(0)], true)]
#[case(vec![Some(1), None], false)]
fn all_uses_truthiness(#[case] values: Vec<Option<i32>>, #[case] expected: bool) {
    assert_eq!(iterate(values).all().unwrap(), expected);
}

#[rstest]
fn any_by_short_circuits_on_infinite_sequence() {
    assert!(counter().any_by(|value| *value > 1000).unwrap());
}

#[rstest]
fn all_by_short_circuits_on_infinite_sequence() {
    assert!(!counter().all_by(|value| *value < 10).unwrap());
}

#[rstest]
fn any_stops_pulling_after_match() {
    let pulls = Cell::new(0);
    let found = range(1, 100)
        .map(|value| {
            pulls.set(pulls.get() + 1);
            value
        })
        .any_by(|value| *value == 3)
        .unwrap();
    assert!(found);
    assert_eq!(pulls.get(), 3);
}

// =============================================================================
// count / last / to_array
// =============================================================================

#[rstest]
fn count_traverses_everything() {
    assert_eq!(range(1, 10).count().unwrap(), 10);
    assert_eq!(range(1, 10).count_by(|value| value % 3 == 0).unwrap(), 3);
}

#[rstest]
fn last_returns_final_value() {
    assert_eq!(range(1, 4).last().unwrap(), Some(4));
    assert_eq!(iterate(Vec::<char>::new()).last().unwrap(), None);
}

#[rstest]
fn to_array_of_pipeline() {
    let values = counter()
        .skip(2)
        .filter(|value| value % 2 == 1)
        .map(|value| value * 10)
        .take(3)
        .to_array()
        .unwrap();
    assert_eq!(values, vec![30, 50, 70]);
}

// =============================================================================
// to_generator
// =============================================================================

#[rstest]
fn to_generator_yields_results() {
    let collected: Result<Vec<i64>, Error> = range(1, 3).to_generator().collect();
    assert_eq!(collected.unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn to_generator_works_with_std_adapters() {
    let doubled: Vec<i64> = counter()
        .take(3)
        .to_generator()
        .map(|value| value.map(|value| value * 2))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(doubled, vec![2, 4, 6]);
}

#[rstest]
fn to_generator_surfaces_errors_as_items() {
    let producer = vec![Ok(1), Err(Error::callback(std::fmt::Error)), Ok(2)];
    let items: Vec<bool> = try_generate(producer)
        .to_generator()
        .map(|item| item.is_ok())
        .collect();
    assert_eq!(items, vec![true, false, true]);
}

#[rstest]
fn to_generator_round_trips_through_generate() {
    let sequence = generate(range(1, 3).to_generator().map(Result::unwrap));
    assert_eq!(sequence.to_array().unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn into_inner_recovers_sequence() {
    let mut iterator = range(1, 3).to_generator();
    assert_eq!(iterator.next().unwrap().unwrap(), 1);
    let rest = iterator.into_inner().to_array().unwrap();
    assert_eq!(rest, vec![2, 3]);
}
