//! Property-based tests for the table operators using proptest.

use std::sync::Arc;

use proptest::prelude::*;
use tabula_reflect::{FieldDescriptor, Record, Seq, Shape, Type, Value};
use tabula_transform::{cols, filter, head, rows, sort, tail, Dir, Match};

// ============================================================================
// Test helpers
// ============================================================================

fn shape() -> Arc<Shape> {
    Arc::new(Shape::named(
        "Item",
        vec![
            FieldDescriptor::new("Id", Type::Uint("usize")),
            FieldDescriptor::new("Name", Type::Str),
            FieldDescriptor::new("Score", Type::Int("i64")),
        ],
    ))
}

/// Builds a table; `Id` is the input position so ordering can be checked.
fn table(items: &[(String, i64)]) -> Value {
    let shape = shape();
    Value::Seq(Seq::new(
        Type::Record(shape.clone()),
        items
            .iter()
            .enumerate()
            .map(|(i, (name, score))| {
                Value::Record(Record::new(
                    shape.clone(),
                    vec![Value::Uint(i as u64), name.as_str().into(), Value::Int(*score)],
                ))
            })
            .collect(),
    ))
}

fn field<'a>(item: &'a Value, name: &str) -> &'a Value {
    item.as_record().unwrap().get(name).unwrap()
}

fn ids(v: &Value) -> Vec<u64> {
    v.as_seq()
        .unwrap()
        .iter()
        .map(|item| match field(item, "Id") {
            Value::Uint(n) => *n,
            other => panic!("unexpected id {other:?}"),
        })
        .collect()
}

fn items_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-c]{0,3}", -5i64..5), 0..40)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Sorting returns the same records in a different order.
    #[test]
    fn sort_is_a_permutation(items in items_strategy(), desc in any::<bool>()) {
        let sorted = sort(&table(&items), "Score", Dir::from_reverse(desc)).unwrap();
        let mut got = ids(&sorted);
        got.sort_unstable();
        prop_assert_eq!(got, (0..items.len() as u64).collect::<Vec<_>>());
    }

    /// Sorting an already sorted table changes nothing.
    #[test]
    fn sort_is_idempotent(items in items_strategy()) {
        let once = sort(&table(&items), "Name", Dir::Asc).unwrap();
        let twice = sort(&once, "Name", Dir::Asc).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Records with equal keys keep their input order, in either direction.
    #[test]
    fn sort_is_stable(items in items_strategy(), desc in any::<bool>()) {
        let sorted = sort(&table(&items), "Score", Dir::from_reverse(desc)).unwrap();
        let seq = sorted.as_seq().unwrap();
        for pair in seq.items().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if field(a, "Score") == field(b, "Score") {
                prop_assert!(
                    matches!((field(a, "Id"), field(b, "Id")), (Value::Uint(x), Value::Uint(y)) if x < y)
                );
            }
        }
    }

    /// Sorted output is ordered by the key.
    #[test]
    fn sort_orders_keys(items in items_strategy()) {
        let sorted = sort(&table(&items), "Score", Dir::Asc).unwrap();
        let scores: Vec<_> = sorted
            .as_seq()
            .unwrap()
            .iter()
            .map(|item| field(item, "Score").clone())
            .collect();
        for pair in scores.windows(2) {
            prop_assert!(matches!((&pair[0], &pair[1]), (Value::Int(a), Value::Int(b)) if a <= b));
        }
    }

    /// Projecting twice onto the same columns is the same as projecting once.
    #[test]
    fn cols_is_idempotent(items in items_strategy()) {
        let once = cols(&table(&items), &["Score", "Name"]).unwrap();
        let twice = cols(&once, &["Score", "Name"]).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Projected fields appear in the requested order.
    #[test]
    fn cols_keeps_requested_order(items in items_strategy()) {
        let out = cols(&table(&items), &["Score", "Id"]).unwrap();
        let shape = out.as_seq().unwrap().record_shape().unwrap().clone();
        prop_assert_eq!(shape.field_names().collect::<Vec<_>>(), vec!["Score", "Id"]);
        prop_assert_eq!(ids(&out), (0..items.len() as u64).collect::<Vec<_>>());
    }

    /// `rows` returns exactly the clamped half-open range.
    #[test]
    fn rows_length(items in items_strategy(), start in -5i64..50, end in -5i64..50) {
        let len = items.len() as i64;
        let expected = (end.clamp(0, len) - start.clamp(0, len)).max(0) as usize;
        let out = rows(&table(&items), start, end).unwrap();
        prop_assert_eq!(out.as_seq().unwrap().len(), expected);
    }

    /// `head` and `tail` never return more than requested.
    #[test]
    fn head_tail_length(items in items_strategy(), n in 0usize..50) {
        let expected = n.min(items.len());
        prop_assert_eq!(head(&table(&items), n).unwrap().as_seq().unwrap().len(), expected);
        prop_assert_eq!(tail(&table(&items), n).unwrap().as_seq().unwrap().len(), expected);
    }

    /// An empty substring matches every record.
    #[test]
    fn empty_contains_is_identity(items in items_strategy()) {
        let t = table(&items);
        let out = filter(&t, "Name", &Match::Contains(String::new())).unwrap();
        prop_assert_eq!(out, t);
    }

    /// Filtering never grows the table and leaves the input alone.
    #[test]
    fn filter_never_grows(items in items_strategy(), needle in "[a-c]{0,2}") {
        let t = table(&items);
        let before = t.clone();
        let out = filter(&t, "Name", &Match::HasPrefix(needle)).unwrap();
        prop_assert!(out.as_seq().unwrap().len() <= items.len());
        prop_assert_eq!(t, before);
    }
}
