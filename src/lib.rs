//! Sealtable - Typed queries over immutable, embedded tables
//!
//! This crate re-exports all layers of the Sealtable system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: sealtable_engine     — Relationships, partners, junctions, hierarchies, variants, labels
//! Layer 1: sealtable_storage    — Tables, sorted and lazy indices, row sequences
//! Layer 0: sealtable_foundation — Core types (RowId, Ref, IndexKey, Error, BuildConfig)
//! ```

pub use sealtable_engine as engine;
pub use sealtable_foundation as foundation;
pub use sealtable_storage as storage;
