//! Integration tests for index key ordering

use std::cmp::Ordering;

use proptest::prelude::*;
use sealtable_foundation::{IndexKey, RowId, compare_scalars};

// =============================================================================
// Text
// =============================================================================

#[test]
fn text_orders_by_scalar_value() {
    // 'É' (U+00C9) sorts after 'Z' (U+005A) and before 'é' (U+00E9).
    assert_eq!(compare_scalars("Z", "É"), Ordering::Less);
    assert_eq!(compare_scalars("É", "é"), Ordering::Less);
    // A prefix sorts first.
    assert_eq!(compare_scalars("Joliot", "Joliot-Curie"), Ordering::Less);
}

#[test]
fn decomposed_text_is_not_normalized() {
    // "é" precomposed (U+00E9) against "e" + combining acute (U+0065 U+0301).
    let precomposed = "\u{e9}";
    let decomposed = "e\u{301}";
    assert_eq!(compare_scalars(decomposed, precomposed), Ordering::Less);
    assert!(!precomposed.to_string().key_eq(&decomposed.to_string()));
}

#[test]
fn astral_plane_sorts_after_bmp() {
    assert_eq!(compare_scalars("\u{ffff}", "\u{1f600}"), Ordering::Less);
}

#[test]
fn string_kinds_agree() {
    let a: &'static str = "Curie";
    let b: &'static str = "Chirac";
    assert_eq!(a.compare(&b), String::from(a).compare(&String::from(b)));
    assert_eq!(
        a.compare(&b),
        Box::<str>::from(a).compare(&Box::<str>::from(b))
    );
}

// =============================================================================
// Floats and compound keys
// =============================================================================

#[test]
fn floats_use_total_order() {
    assert_eq!(1.0f64.compare(&2.1), Ordering::Less);
    assert!((-0.0f32).key_eq(&0.0));
    assert_eq!(f64::NAN.compare(&f64::INFINITY), Ordering::Greater);
    assert!(f64::NAN.key_eq(&f64::NAN));
}

#[test]
fn option_sorts_none_first() {
    assert_eq!(None::<u8>.compare(&Some(0)), Ordering::Less);
    assert_eq!(Some(3u8).compare(&Some(2)), Ordering::Greater);
}

#[test]
fn tuples_compare_lexicographically() {
    assert_eq!((1u32, RowId(9)).compare(&(2, RowId(0))), Ordering::Less);
    assert_eq!((1u32, RowId(1)).compare(&(1, RowId(0))), Ordering::Greater);
}

proptest! {
    #[test]
    fn scalar_order_matches_utf8_bytes(a in ".*", b in ".*") {
        prop_assert_eq!(compare_scalars(&a, &b), a.as_bytes().cmp(b.as_bytes()));
    }

    #[test]
    fn integer_keys_match_ord(a: i64, b: i64) {
        prop_assert_eq!(a.compare(&b), a.cmp(&b));
    }

    #[test]
    fn float_keys_are_antisymmetric(a: f64, b: f64) {
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }
}
