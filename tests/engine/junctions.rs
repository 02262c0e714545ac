//! Integration tests for many-to-many joins through a junction table

use sealtable_engine::{Junction, Relationship, RelationshipSchema};
use sealtable_foundation::{Ref, TableId};
use sealtable_storage::Table;

struct Client {
    name: &'static str,
}

struct Product {
    name: &'static str,
}

struct Transaction {
    client: Ref<Client>,
    product: Ref<Product>,
    quantity: u32,
}

struct Store {
    clients: Table<Client>,
    products: Table<Product>,
    transactions: Table<Transaction>,
}

fn store() -> Store {
    let sale = |client, product, quantity| Transaction {
        client: Ref::at(client),
        product: Ref::at(product),
        quantity,
    };
    Store {
        clients: Table::new(
            TableId(1),
            "client",
            ["John", "Alix", "David"].map(|name| Client { name }),
        )
        .unwrap(),
        products: Table::new(
            TableId(2),
            "product",
            ["Apple", "Banana", "Peach", "Cherry"].map(|name| Product { name }),
        )
        .unwrap(),
        transactions: Table::new(
            TableId(3),
            "transaction",
            [
                sale(0, 0, 3),
                sale(0, 1, 1),
                sale(1, 2, 6),
                sale(2, 1, 2),
                sale(0, 2, 4),
                sale(1, 0, 1),
            ],
        )
        .unwrap(),
    }
}

fn purchases(store: &Store) -> Junction<Client, Product, Transaction> {
    let client = Relationship::required(
        RelationshipSchema::new("client"),
        &store.transactions,
        &store.clients,
        |t: &Transaction| t.client,
    )
    .unwrap();
    let product = Relationship::required(
        RelationshipSchema::new("product"),
        &store.transactions,
        &store.products,
        |t: &Transaction| t.product,
    )
    .unwrap();
    Junction::new(client, product).unwrap()
}

fn product_list(store: &Store, client: u32) -> Vec<&'static str> {
    purchases(store)
        .related(&store.transactions, &store.products, Ref::at(client))
        .map(|p| p.name)
        .collect()
}

fn client_list(store: &Store, product: u32) -> Vec<&'static str> {
    purchases(store)
        .related_rev(&store.transactions, &store.clients, Ref::at(product))
        .map(|c| c.name)
        .collect()
}

#[test]
fn by_clients() {
    let store = store();
    assert_eq!(product_list(&store, 0), vec!["Apple", "Banana", "Peach"]);
    assert_eq!(product_list(&store, 1), vec!["Peach", "Apple"]);
    assert_eq!(product_list(&store, 2), vec!["Banana"]);
}

#[test]
fn by_products() {
    let store = store();
    assert_eq!(client_list(&store, 0), vec!["John", "Alix"]);
    assert_eq!(client_list(&store, 1), vec!["John", "David"]);
    assert_eq!(client_list(&store, 2), vec!["Alix", "John"]);
    assert!(client_list(&store, 3).is_empty());
}

#[test]
fn junction_rows_carry_their_own_columns() {
    let store = store();
    let purchases = purchases(&store);
    let johns_quantity: u32 = purchases
        .links(&store.transactions, Ref::at(0))
        .map(|t| t.quantity)
        .sum();
    assert_eq!(johns_quantity, 8);
    let peach_buyers: Vec<_> = purchases
        .related_rev_refs(&store.transactions, Ref::at(2))
        .collect();
    assert_eq!(peach_buyers, vec![Ref::at(1), Ref::at(0)]);
}

#[test]
fn junction_sides_must_share_a_table() {
    let store = store();
    let client = Relationship::required(
        RelationshipSchema::new("client"),
        &store.transactions,
        &store.clients,
        |t: &Transaction| t.client,
    )
    .unwrap();
    let elsewhere = Table::new(
        TableId(4),
        "returns",
        [Transaction {
            client: Ref::at(0),
            product: Ref::at(0),
            quantity: 1,
        }],
    )
    .unwrap();
    let product = Relationship::required(
        RelationshipSchema::new("product"),
        &elsewhere,
        &store.products,
        |t: &Transaction| t.product,
    )
    .unwrap();
    assert!(Junction::new(client, product).is_err());
}
