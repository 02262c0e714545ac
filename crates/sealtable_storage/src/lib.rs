//! Table storage and sorted indices for Sealtable.
//!
//! This crate provides:
//! - [`Table`] - Immutable, ordered storage for one record type
//! - [`Index`] - Value-sorted column indices with exact and range lookup
//! - [`LazyIndex`] - Indices built at most once, on first use
//! - [`Rows`] - Lazy result sequences resolved against a table

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod index;
pub mod lazy;
pub mod rows;
pub mod table;

pub use index::Index;
pub use lazy::LazyIndex;
pub use rows::Rows;
pub use table::Table;
