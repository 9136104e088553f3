//! Property-based tests for value ordering and the type text form

use std::cmp::Ordering;

use mzbind::prelude::*;
use proptest::prelude::*;

/// Integers and floats, including pairs that only differ beyond f64 precision
fn number_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        (-2i64..=2).prop_map(|offset| Value::from((1i64 << 53) + offset)),
        Just(Value::Float((1i64 << 53) as f64)),
        (-20i64..20).prop_map(|n| Value::Float(n as f64 / 2.0)),
        any::<f64>().prop_filter("finite", |v| v.is_finite()).prop_map(Value::from),
    ]
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        number_value(),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        (0i64..4).prop_map(|ordinal| Value::from(EnumValue::new("Charge", "z", ordinal))),
        (0i64..4).prop_map(|ordinal| Value::from(EnumValue::new("Label", "l", ordinal))),
        "[A-Z]{1,6}".prop_map(|name| Value::from(Record::new("Protein").with_display(name))),
        "[0-9]{1,2}".prop_map(|digits| Value::from(Record::new("Scan").with_display(digits))),
    ]
}

fn any_value() -> impl Strategy<Value = Value> {
    scalar_value().prop_flat_map(|value| {
        prop_oneof![
            Just(value.clone()),
            Just(LinkedValue::new("link", value.clone()).into_value()),
            Just(LinkedValue::new("outer", LinkedValue::new("inner", value).into_value()).into_value()),
        ]
    })
}

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,8}".prop_filter("generic type names are reserved", |name| {
        !matches!(name.as_str(), "Enum" | "Optional" | "Link" | "List" | "Map")
    })
}

fn data_type() -> impl Strategy<Value = DataType> {
    let leaf = prop_oneof![
        Just(DataType::BOOL),
        Just(DataType::INT),
        Just(DataType::FLOAT),
        Just(DataType::TEXT),
        Just(DataType::DATETIME),
        type_name().prop_map(DataType::record),
        type_name().prop_map(DataType::enumeration),
    ];
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(DataType::optional),
            inner.clone().prop_map(DataType::link),
            inner.clone().prop_map(DataType::list),
            (inner.clone(), inner).prop_map(|(k, v)| DataType::map(k, v)),
        ]
    })
}

proptest! {
    /// Every value compares equal to itself
    #[test]
    fn test_compare_reflexive(a in any_value()) {
        prop_assert_eq!(compare_values(&a, &a.clone()), Ordering::Equal);
    }

    /// Swapping the operands reverses the ordering
    #[test]
    fn test_compare_antisymmetric(a in any_value(), b in any_value()) {
        prop_assert_eq!(compare_values(&a, &b), compare_values(&b, &a).reverse());
    }

    /// Ordering is transitive across mixed kinds
    #[test]
    fn test_compare_transitive(a in any_value(), b in any_value(), c in any_value()) {
        let mut values = [a, b, c];
        values.sort_by(compare_values);
        prop_assert_ne!(compare_values(&values[0], &values[1]), Ordering::Greater);
        prop_assert_ne!(compare_values(&values[1], &values[2]), Ordering::Greater);
        prop_assert_ne!(compare_values(&values[0], &values[2]), Ordering::Greater);
    }

    /// Mixed report columns sort without violating the order
    #[test]
    fn test_sort_mixed_column(values in prop::collection::vec(any_value(), 0..64)) {
        let mut sorted = values;
        sorted.sort_by(compare_values);
        for i in 0..sorted.len() {
            for j in i + 1..sorted.len() {
                prop_assert_ne!(compare_values(&sorted[i], &sorted[j]), Ordering::Greater);
            }
        }
    }

    /// Null sorts before every other value
    #[test]
    fn test_null_first(a in any_value()) {
        let unwrapped_null = matches!(a, Value::Null)
            || matches!(compare_values(&a, &Value::Null), Ordering::Equal);
        if !unwrapped_null {
            prop_assert_eq!(compare_values(&Value::Null, &a), Ordering::Less);
            prop_assert_eq!(compare_values(&a, &Value::Null), Ordering::Greater);
        }
    }

    /// Numbers follow their natural order, through links
    #[test]
    fn test_numbers_natural_order(a in any::<i64>(), b in any::<i64>()) {
        let linked = LinkedValue::new("a", a).into_value();
        prop_assert_eq!(compare_values(&linked, &Value::from(b)), a.cmp(&b));
    }

    /// Records without a natural order compare by their display text
    #[test]
    fn test_records_compare_as_text(a in "[A-Z]{1,6}", b in "[A-Z]{1,6}") {
        let ra = Value::from(Record::new("Protein").with_display(a.clone()));
        let rb = Value::from(Record::new("Protein").with_display(b.clone()));
        prop_assert_eq!(compare_values(&ra, &rb), a.cmp(&b));
    }

    /// Sorting optional, possibly linked numbers yields nulls first, then ascending numbers
    #[test]
    fn test_sort_numbers(values in prop::collection::vec((any::<Option<i64>>(), any::<bool>()), 0..24)) {
        let mut sorted: Vec<Value> = values
            .iter()
            .map(|(number, linked)| {
                let value = Value::from(*number);
                if *linked { LinkedValue::new("n", value).into_value() } else { value }
            })
            .collect();
        sorted.sort_by(compare_values);

        let mut expected: Vec<Option<i64>> = values.iter().map(|(number, _)| *number).collect();
        expected.sort();
        let actual: Vec<Value> = sorted.iter().map(|v| match v {
            Value::Link(link) => link.value(),
            other => other.clone(),
        }).collect();
        let expected: Vec<Value> = expected.into_iter().map(Value::from).collect();
        prop_assert_eq!(actual, expected);
    }

    /// The printed type form parses back to the same type
    #[test]
    fn test_type_text_form(ty in data_type()) {
        let parsed: DataType = ty.to_string().parse().unwrap();
        prop_assert_eq!(parsed, ty);
    }
}
