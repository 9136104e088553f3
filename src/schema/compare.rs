use std::cmp::Ordering;
use std::sync::Arc;

use crate::value::Value;

/// Orders two arbitrary values for sorting a report grid.
///
/// Link values on either side are unwrapped first. Null sorts before any
/// value. Mutually comparable values use their natural order. Values of
/// different kinds sort by kind (booleans, numbers, timestamps, text,
/// enumeration members, then everything else), members of different
/// enumerations by type name, and values without a natural order by their
/// display strings. The result is a total order, safe for `sort_by`.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }
    let a = unwrap_links(a);
    let b = unwrap_links(b);

    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let rank = a.sort_rank().cmp(&b.sort_rank());
    if rank != Ordering::Equal {
        return rank;
    }
    if let (Value::Enum(x), Value::Enum(y)) = (&a, &b) {
        if x.type_name != y.type_name {
            return x.type_name.cmp(&y.type_name);
        }
    }
    a.natural_cmp(&b)
        .unwrap_or_else(|| a.to_string().cmp(&b.to_string()))
}

/// Follows link values until reaching a non-link value. A link that is seen a
/// second time ends the walk and is returned as-is.
pub(crate) fn unwrap_links(value: &Value) -> Value {
    let mut current = value.clone();
    let mut visited: Vec<*const ()> = Vec::new();
    while let Value::Link(link) = &current {
        let ptr = Arc::as_ptr(link) as *const ();
        if visited.contains(&ptr) {
            break;
        }
        visited.push(ptr);
        let next = link.value();
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{EnumValue, LinkValue, LinkedValue, Record};
    use std::fmt;
    use std::sync::Mutex;

    /// Link whose target is set after construction, so it can point at itself
    #[derive(Debug)]
    struct LoopLink {
        name: &'static str,
        target: Mutex<Option<Value>>,
    }

    impl LinkValue for LoopLink {
        fn value(&self) -> Value {
            self.target.lock().unwrap().clone().unwrap_or(Value::Null)
        }
    }

    impl fmt::Display for LoopLink {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name)
        }
    }

    fn loop_link(name: &'static str) -> Arc<LoopLink> {
        Arc::new(LoopLink {
            name,
            target: Mutex::new(None),
        })
    }

    #[test]
    fn test_null_ordering() {
        assert_eq!(compare_values(&Value::Null, &Value::Null), Ordering::Equal);
        assert_eq!(compare_values(&Value::Null, &Value::from(1)), Ordering::Less);
        assert_eq!(compare_values(&Value::from("a"), &Value::Null), Ordering::Greater);
    }

    #[test]
    fn test_natural_ordering() {
        assert_eq!(compare_values(&Value::from(9), &Value::from(10)), Ordering::Less);
        assert_eq!(compare_values(&Value::from("b"), &Value::from("a")), Ordering::Greater);
    }

    #[test]
    fn test_string_fallback() {
        let a = Value::from(Record::new("Protein").with_display("ALBU_BOVIN"));
        let b = Value::from(Record::new("Protein").with_display("CAH2_BOVIN"));
        assert_eq!(compare_values(&a, &b), Ordering::Less);

    }

    #[test]
    fn test_mixed_kinds_order_by_kind() {
        // numbers sort before text whatever the text says
        assert_eq!(compare_values(&Value::from("10"), &Value::from(9)), Ordering::Greater);
        assert_eq!(compare_values(&Value::from("9"), &Value::from(9.5)), Ordering::Greater);
        assert_eq!(compare_values(&Value::from(true), &Value::from(0)), Ordering::Less);

        // a record displaying "9" still sorts after every number and text
        let record = Value::from(Record::new("Protein").with_display("9"));
        assert_eq!(compare_values(&record, &Value::from(10)), Ordering::Greater);
        assert_eq!(compare_values(&record, &Value::from("A")), Ordering::Greater);

        let label = Value::from(EnumValue::new("Label", "Light", 9));
        let polarity = Value::from(EnumValue::new("Polarity", "Negative", 0));
        assert_eq!(compare_values(&label, &polarity), Ordering::Less);
    }

    #[test]
    fn test_int_float_compare_exactly() {
        let big = 1i64 << 53;
        let float = Value::Float(big as f64);
        assert_eq!(compare_values(&Value::from(big), &float), Ordering::Equal);
        assert_eq!(compare_values(&Value::from(big + 1), &float), Ordering::Greater);
        assert_eq!(compare_values(&float, &Value::from(big + 1)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(i64::MAX), &Value::Float(f64::INFINITY)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(-3), &Value::Float(-2.5)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(-2), &Value::Float(-2.5)), Ordering::Greater);
    }

    #[test]
    fn test_mixed_column_sorts() {
        let mut values: Vec<Value> = (0..200i64)
            .map(|i| match i % 5 {
                0 => Value::from(i),
                1 => Value::from(i.to_string()),
                2 => Value::from(i as f64 + 0.5),
                3 => Value::Null,
                _ => LinkedValue::new("n", i % 7).into_value(),
            })
            .collect();
        values.sort_by(compare_values);

        for pair in values.windows(2) {
            assert_ne!(compare_values(&pair[0], &pair[1]), Ordering::Greater);
        }
        assert!(values[..40].iter().all(Value::is_null));
        assert!(matches!(values[199], Value::Text(_)));
    }

    #[test]
    fn test_links_are_unwrapped() {
        let a = LinkedValue::new("zzz", 1).into_value();
        let b = LinkedValue::new("aaa", 2).into_value();
        assert_eq!(compare_values(&a, &b), Ordering::Less);

        let nested = LinkedValue::new("outer", LinkedValue::new("inner", 5).into_value()).into_value();
        assert_eq!(unwrap_links(&nested), Value::Int(5));
    }

    #[test]
    fn test_self_referential_link_terminates() {
        let link = loop_link("self");
        *link.target.lock().unwrap() = Some(Value::Link(link.clone()));
        let value = Value::Link(link.clone());

        assert!(matches!(unwrap_links(&value), Value::Link(_)));
        assert_eq!(compare_values(&value, &Value::Link(link.clone())), Ordering::Equal);

        // break the cycle so the Arc is released
        *link.target.lock().unwrap() = None;
    }

    #[test]
    fn test_link_cycle_terminates() {
        let first = loop_link("first");
        let second = loop_link("second");
        *first.target.lock().unwrap() = Some(Value::Link(second.clone()));
        *second.target.lock().unwrap() = Some(Value::Link(first.clone()));

        let ordering = compare_values(&Value::Link(first.clone()), &Value::from("x"));
        assert_ne!(ordering, Ordering::Equal);

        *first.target.lock().unwrap() = None;
        *second.target.lock().unwrap() = None;
    }
}
