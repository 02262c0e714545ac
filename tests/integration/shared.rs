//! Tables and relationships shared across threads

use std::sync::Arc;
use std::thread;

use sealtable::engine::{Relationship, RelationshipSchema};
use sealtable::foundation::{BuildConfig, Ref, TableId};
use sealtable::storage::Table;

use crate::init_tracing;

struct Region {
    name: String,
}

struct Town {
    region: Ref<Region>,
}

#[test]
fn lazy_reverse_index_across_threads() {
    init_tracing();
    let regions = Arc::new(
        Table::new(
            TableId(1),
            "region",
            (0..16).map(|i| Region { name: format!("region-{i}") }),
        )
        .unwrap(),
    );
    let towns = Arc::new(
        Table::new(
            TableId(2),
            "town",
            (0..4_096u32).map(|i| Town { region: Ref::at(i % 16) }),
        )
        .unwrap(),
    );
    let located = Arc::new(
        Relationship::build_with(
            BuildConfig::new().with_eager_indexes(false),
            RelationshipSchema::new("region"),
            &*towns,
            &*regions,
            |t: &Town| Some(t.region),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..16u32)
        .map(|region| {
            let (towns, located) = (Arc::clone(&towns), Arc::clone(&located));
            thread::spawn(move || located.reverse(&towns, Ref::at(region)).count())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 256);
    }
    let first = located.resolve(&regions, towns.get(17).unwrap()).unwrap();
    assert_eq!(first.name, "region-1");
}
