//! Schema definitions for reference columns.
//!
//! A reference column is described by how many source rows may point at one
//! target row ([`Cardinality`]) and whether a source row may point nowhere
//! ([`Optionality`]).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Schema definition for a reference column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationshipSchema {
    /// Relationship name (e.g., `country`, `parent`).
    pub name: String,
    /// Cardinality constraint.
    pub cardinality: Cardinality,
    /// Whether the reference may be absent.
    pub optionality: Optionality,
}

impl RelationshipSchema {
    /// Creates a required many-to-one relationship schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::ManyToOne,
            optionality: Optionality::Required,
        }
    }

    /// Sets the cardinality.
    #[must_use]
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Sets the optionality.
    #[must_use]
    pub fn with_optionality(mut self, optionality: Optionality) -> Self {
        self.optionality = optionality;
        self
    }

    /// Marks the reference as optional.
    #[must_use]
    pub fn optional(self) -> Self {
        self.with_optionality(Optionality::Optional)
    }

    /// Marks the relationship as one-to-one.
    #[must_use]
    pub fn one_to_one(self) -> Self {
        self.with_cardinality(Cardinality::OneToOne)
    }

    /// Returns true if absent references are allowed.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optionality == Optionality::Optional
    }
}

/// Cardinality constraint for a reference column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cardinality {
    /// Each target row is referenced by at most one source row.
    OneToOne,
    /// Target rows can be referenced by many source rows.
    ManyToOne,
}

/// Whether a reference column may hold explicit absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Optionality {
    /// Every source row references exactly one target row.
    Required,
    /// A source row may reference nothing.
    Optional,
}
