//! Integration tests for text columns across scripts

use sealtable_foundation::TableId;
use sealtable_storage::{Index, Table};

static TEXTS: [&str; 6] = [
    "𝒾ňⅽ𝗈ďḓẚ𝑡ⱥ: ɇ𝗑ƫ𝗋ꞓ",
    "hello",
    "κόσμε",
    "いろはにほへとちりぬるを",
    "éventuellement validé",
    "Да, но фальшивый экземпляр",
];

fn texts() -> Table<&'static str> {
    Table::new(TableId(1), "strencoding", TEXTS).unwrap()
}

#[test]
fn every_script_finds_itself() {
    let table = texts();
    let index = Index::build(&table, |t: &&'static str| *t);
    for text in TEXTS {
        let mut hits = index.range(&table, &text, &text);
        assert_eq!(hits.next().copied(), Some(text));
        assert!(hits.next().is_none());
    }
}

#[test]
fn owned_and_static_text_agree() {
    let table = texts();
    let borrowed = Index::build(&table, |t: &&'static str| *t);
    let owned = Index::build(&table, |t: &&'static str| (*t).to_string());
    let a: Vec<_> = borrowed.iter_sorted(&table).collect();
    let b: Vec<_> = owned.iter_sorted(&table).collect();
    assert_eq!(a, b);
}

#[test]
fn sorted_by_first_scalar() {
    let table = texts();
    let index = Index::build(&table, |t: &&'static str| *t);
    let sorted: Vec<_> = index.iter_sorted(&table).copied().collect();
    assert_eq!(
        sorted,
        vec![
            "hello",
            "éventuellement validé",
            "κόσμε",
            "Да, но фальшивый экземпляр",
            "いろはにほへとちりぬるを",
            "𝒾ňⅽ𝗈ďḓẚ𝑡ⱥ: ɇ𝗑ƫ𝗋ꞓ",
        ]
    );
}

#[test]
fn prefix_range_over_cyrillic() {
    let table = texts();
    let index = Index::build(&table, |t: &&'static str| *t);
    let hits: Vec<_> = index.range(&table, &"Д", &"Д\u{10ffff}").copied().collect();
    assert_eq!(hits, vec!["Да, но фальшивый экземпляр"]);
}
