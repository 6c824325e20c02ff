use std::cell::Cell;

use presence::{Optional, ScanError, Value, EMPTY_TEXT};

#[test]
fn of_and_empty_report_presence() {
    assert_eq!(Optional::of(7).get(), (&7, true));
    assert_eq!(Optional::of(0).get(), (&0, true), "zero values stay present");
    assert_eq!(Optional::<i32>::empty().get(), (&0, false));
    assert_eq!(Optional::<String>::empty().get(), (&String::new(), false));
    assert!(Optional::of("").is_present());
    assert!(Optional::<bool>::empty().is_empty());
}

#[test]
fn nillable_and_zeroable_constructors() {
    assert!(Optional::of_nillable(None::<i32>).is_empty());
    assert!(Optional::of_nillable(Some(0)).is_present());
    assert!(Optional::of_nillable(Value::Null).is_empty());
    assert!(Optional::of_nillable(0u8).is_present(), "plain primitives are never nil");
    assert!(Optional::of_nillable(Vec::<u8>::new()).is_present());

    assert!(Optional::of_zeroable(0i64).is_empty());
    assert!(Optional::of_zeroable(String::new()).is_empty());
    assert!(Optional::of_zeroable(false).is_empty());
    assert!(Optional::of_zeroable(Some(0)).is_present());
    assert_eq!(Optional::of_zeroable(3.5).get(), (&3.5, true));
}

#[test]
fn require_and_try_require() {
    assert_eq!(Optional::of(5).require(), &5);
    assert_eq!(Optional::<i32>::empty().try_require(), Err(ScanError::NotPresent));
}

#[test]
#[should_panic(expected = "value is not present")]
fn require_on_empty_panics() {
    Optional::<u8>::empty().require();
}

#[test]
fn fallbacks() {
    assert_eq!(Optional::of(1).or_else(2), 1);
    assert_eq!(Optional::empty().or_else(2), 2);
    assert_eq!(Optional::empty().or_else_get(|| 3), 3);

    let called = Cell::new(false);
    let value = Optional::of(1).or_else_get(|| {
        called.set(true);
        9
    });
    assert_eq!(value, 1);
    assert!(!called.get(), "fallback is not evaluated for a present container");

    let failed: Result<i32, &str> = Optional::empty().or_else_try_get(|| Err("no default"));
    assert_eq!(failed, Err("no default"));
    let fine: Result<i32, &str> = Optional::of(4).or_else_try_get(|| Err("unused"));
    assert_eq!(fine, Ok(4));
}

#[test]
fn filter_calls_predicate_at_most_once() {
    let calls = Cell::new(0);
    let kept = Optional::of(10).filter(|v| {
        calls.set(calls.get() + 1);
        *v > 5
    });
    assert_eq!(kept, Optional::of(10));
    assert_eq!(calls.get(), 1);

    let dropped = Optional::of(1).filter(|v| *v > 5);
    assert!(dropped.is_empty());
    assert_eq!(dropped.get(), (&0, false), "filtered out containers hold the zero value");

    let never = Optional::<i32>::empty().filter(|_| {
        calls.set(calls.get() + 1);
        true
    });
    assert!(never.is_empty());
    assert_eq!(calls.get(), 1, "predicate is not called for an empty container");
}

#[test]
fn map_never_invokes_function_on_empty() {
    let calls = Cell::new(0);
    let mapped: Optional<String> = Optional::<i32>::empty().map(|v| {
        calls.set(calls.get() + 1);
        v.to_string()
    });
    assert!(mapped.is_empty());
    let flat: Optional<String> = Optional::<i32>::empty().flat_map(|v| {
        calls.set(calls.get() + 1);
        Optional::of(v.to_string())
    });
    assert!(flat.is_empty());
    assert_eq!(calls.get(), 0);

    assert_eq!(Optional::of(2).map(|v| v * 10), Optional::of(20));
    assert_eq!(Optional::of(2).flat_map(|_| Optional::<u8>::empty()), Optional::empty());
}

#[test]
fn try_variants_propagate_failure() {
    let parsed: Result<Optional<i32>, std::num::ParseIntError> =
        Optional::of("12").try_map(|s| s.parse());
    assert_eq!(parsed, Ok(Optional::of(12)));

    let broken = Optional::of("twelve").try_map(|s| s.parse::<i32>());
    assert!(broken.is_err());

    let untouched: Result<Optional<i32>, String> =
        Optional::<&str>::empty().try_map(|_| Err("never called".to_string()));
    assert_eq!(untouched, Ok(Optional::empty()));

    let flat: Result<Optional<u8>, String> =
        Optional::of(300).try_flat_map(|v: i32| u8::try_from(v).map(Optional::of).map_err(|e| e.to_string()));
    assert!(flat.is_err());
}

#[test]
fn find_returns_first_present() {
    let found = Optional::find([Optional::empty(), Optional::of(2), Optional::of(3)]);
    assert_eq!(found, Optional::of(2));
    let none = Optional::<i32>::find([Optional::empty(), Optional::empty()]);
    assert!(none.is_empty());
    assert_eq!(Optional::must_find([Optional::empty(), Optional::of("x")]), Optional::of("x"));
}

#[test]
#[should_panic]
fn must_find_panics_without_a_present_container() {
    Optional::<i32>::must_find([Optional::empty(), Optional::empty()]);
}

#[test]
fn get_any_collects_in_order() {
    let values = Optional::get_any([Optional::of(3), Optional::empty(), Optional::of(1)]);
    assert_eq!(values, vec![3, 1]);
    assert!(Optional::<i32>::get_any([Optional::empty()]).is_empty());
    assert_eq!(Optional::require_any([Optional::empty(), Optional::of(0)]), vec![0]);
}

#[test]
#[should_panic]
fn require_any_panics_when_nothing_is_present() {
    Optional::<String>::require_any([Optional::empty()]);
}

#[test]
fn display_and_debug() {
    assert_eq!(Optional::of(42).to_string(), "42");
    assert_eq!(Optional::<i32>::empty().to_string(), EMPTY_TEXT);
    assert_eq!(format!("{:?}", Optional::of("a")), "Optional(\"a\")");
    assert_eq!(format!("{:?}", Optional::<u8>::empty()), "Optional.empty");
}

#[test]
fn option_conversions() {
    assert_eq!(Optional::from(Some(1)), Optional::of(1));
    assert_eq!(Optional::<i32>::from(None), Optional::empty());
    assert_eq!(Option::<i32>::from(Optional::of(1)), Some(1));
    assert_eq!(Optional::<i32>::empty().into_option(), None);
    assert_eq!(Optional::of(5).as_option(), Some(&5));
}

#[test]
fn encode_present_and_absent() {
    assert_eq!(Optional::of(7u8).encode(), Ok(Value::Int(7)));
    assert_eq!(Optional::<String>::empty().encode(), Ok(Value::Null));
    assert_eq!(Optional::of(Some(1.5f32)).encode(), Ok(Value::Float(1.5)));
    assert_eq!(Optional::of(None::<i32>).encode(), Ok(Value::Null));
    assert!(matches!(
        Optional::of(u64::MAX).encode(),
        Err(ScanError::Range { destination: "i64", .. })
    ));
    assert_eq!(Optional::of(i64::MAX as u64).encode(), Ok(Value::Int(i64::MAX)));
}
