//! Navigation between Sealtable tables.
//!
//! This crate provides:
//! - [`Relationship`] - Reference columns with N-1 and 1-N navigation
//! - [`Partner`] - Validated one-to-one pairs
//! - [`Junction`] - Many-to-many relationships through a junction table
//! - [`Hierarchy`] - Self-referential tables stored in pre-order
//! - [`VariantColumn`] - Columns referencing one of several tables
//! - [`LabelMap`] and [`ExternalKeys`] - Symbolic row names and external correlation
//!
//! Everything is validated once at construction according to a
//! [`BuildConfig`](sealtable_foundation::BuildConfig); queries never fail on
//! empty results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod check;
pub mod hierarchy;
pub mod junction;
pub mod label;
pub mod partner;
pub mod relationship;
pub mod schema;
pub mod variant;

pub use hierarchy::Hierarchy;
pub use junction::Junction;
pub use label::{ExternalIndex, ExternalKeys, Label, LabelMap};
pub use partner::Partner;
pub use relationship::Relationship;
pub use schema::{Cardinality, Optionality, RelationshipSchema};
pub use variant::{Variant, VariantColumn};
