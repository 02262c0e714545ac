//! Integration tests for table storage

use sealtable_foundation::{Ref, RowAddr, RowId, TableId};
use sealtable_storage::Table;

#[derive(Debug, PartialEq)]
struct Country {
    name: &'static str,
    population: u32,
}

fn countries() -> Table<Country> {
    Table::new(
        TableId(7),
        "country",
        [
            Country { name: "France", population: 68 },
            Country { name: "United Kingdom", population: 67 },
            Country { name: "Germany", population: 84 },
        ],
    )
    .unwrap()
}

// =============================================================================
// Positional Access
// =============================================================================

#[test]
fn get_in_range() {
    let table = countries();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(2).unwrap().name, "Germany");
    assert_eq!(table.row(RowId(1)).name, "United Kingdom");
    assert_eq!(table[RowId(0)].population, 68);
}

#[test]
fn get_out_of_range_is_an_error() {
    let table = countries();
    let err = table.get(3).unwrap_err();
    assert!(err.is_out_of_range());
    assert!(err.to_string().contains("country"));
    assert!(table.reference(3).is_err());
}

#[test]
fn empty_table() {
    let table = Table::new(TableId(1), "nothing", Vec::<Country>::new()).unwrap();
    assert!(table.is_empty());
    assert!(table.get(0).is_err());
    assert_eq!(table.iter().count(), 0);
}

// =============================================================================
// References
// =============================================================================

#[test]
fn references_resolve_to_rows() {
    let table = countries();
    let uk: Ref<Country> = table.reference(1).unwrap();
    assert_eq!(table.resolve(uk).name, "United Kingdom");
    assert_eq!(table[uk].population, 67);
    assert!(table.resolve_opt(None).is_none());
    assert_eq!(table.addr(uk.row()), RowAddr::new(TableId(7), RowId(1)));
}

#[test]
fn position_of_recovers_row_identity() {
    let table = countries();
    let germany = table.get(2).unwrap();
    assert_eq!(table.position_of(germany), Some(RowId(2)));
    assert_eq!(table.ref_of(germany), Some(Ref::at(2)));

    // An equal record that lives elsewhere is not a row of this table.
    let lookalike = Country { name: "Germany", population: 84 };
    assert_eq!(&lookalike, germany);
    assert_eq!(table.position_of(&lookalike), None);
}

// =============================================================================
// Iteration
// =============================================================================

#[test]
fn iteration_is_restartable_and_ordered() {
    let table = countries();
    let first: Vec<_> = table.iter().map(|c| c.name).collect();
    let second: Vec<_> = (&table).into_iter().map(|c| c.name).collect();
    assert_eq!(first, vec!["France", "United Kingdom", "Germany"]);
    assert_eq!(first, second);
    assert_eq!(table.as_slice().len(), 3);
}

#[test]
fn rows_pair_ids_with_records() {
    let table = countries();
    let ids: Vec<_> = table.rows().map(|(row, _)| row).collect();
    assert_eq!(ids, vec![RowId(0), RowId(1), RowId(2)]);
    assert_eq!(table.row_ids().rev().next(), Some(RowId(2)));
}

#[test]
fn tables_are_shareable_across_threads() {
    fn assert_sync<T: Send + Sync>(_: &T) {}
    assert_sync(&countries());
}
