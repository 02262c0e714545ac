//! Integration tests for row identity and typed references

use std::collections::HashSet;

use sealtable_foundation::{OptRef, Ref, RowAddr, RowId, TableId};

struct Person;
struct Country;

// =============================================================================
// RowId
// =============================================================================

#[test]
fn row_id_round_trips_through_usize() {
    let row = RowId::new(41);
    assert_eq!(row.index(), 41);
    assert_eq!(RowId::from_index(41), Some(row));
    assert_eq!(usize::from(row), 41);
}

#[test]
fn row_id_rejects_positions_past_u32() {
    #[cfg(target_pointer_width = "64")]
    assert_eq!(RowId::from_index(RowId::MAX_ROWS + 1), None);
    assert!(RowId::from_index(RowId::MAX_ROWS).is_some());
}

#[test]
fn row_id_display() {
    assert_eq!(format!("{}", RowId(3)), "#3");
    assert_eq!(format!("{:?}", RowId(3)), "RowId(3)");
    assert_eq!(format!("{}", TableId(2)), "table#2");
}

// =============================================================================
// Ref
// =============================================================================

#[test]
fn refs_compare_by_position() {
    let a: Ref<Person> = Ref::at(1);
    let b: Ref<Person> = Ref::new(RowId(1));
    let c: Ref<Person> = Ref::at(2);
    assert_eq!(a, b);
    assert!(a < c);
    assert_eq!(a.row(), RowId(1));
    assert_eq!(RowId::from(c), RowId(2));
}

#[test]
fn refs_are_copy_and_hash_without_bounds_on_target() {
    // Person implements none of Copy, Eq or Hash.
    let r: Ref<Person> = Ref::at(0);
    let copy = r;
    let set: HashSet<Ref<Person>> = [r, copy, Ref::at(1)].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn optional_refs_model_absence() {
    let none: OptRef<Country> = None;
    let some: OptRef<Country> = Some(Ref::at(4));
    assert!(none.is_none());
    assert_eq!(some.map(Ref::index), Some(4));
}

#[test]
fn row_addr_distinguishes_tables() {
    let left = RowAddr::new(TableId(1), RowId(0));
    let right = RowAddr::new(TableId(2), RowId(0));
    assert_ne!(left, right);
    assert_eq!(format!("{left:?}"), "RowAddr(table#1, #0)");
}
