//! Error types for the Sealtable system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Queries never fail because nothing matched: an empty result is a normal
//! outcome. Errors come from positional access outside a table, and from
//! construction-time validation of the static data.

use std::fmt;

use thiserror::Error;

use crate::id::RowId;

/// The main error type for Sealtable operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an out-of-range error for a positional accessor.
    #[must_use]
    pub fn out_of_range(table: impl Into<String>, position: usize, length: usize) -> Self {
        Self::new(ErrorKind::OutOfRange {
            table: table.into(),
            position,
            length,
        })
    }

    /// Creates a dangling reference error.
    #[must_use]
    pub fn dangling_reference(
        field: impl Into<String>,
        row: RowId,
        target: impl Into<String>,
        position: usize,
        length: usize,
    ) -> Self {
        Self::new(ErrorKind::DanglingReference {
            field: field.into(),
            row,
            target: target.into(),
            position,
            length,
        })
    }

    /// Creates a hierarchy ordering error.
    #[must_use]
    pub fn hierarchy_order(table: impl Into<String>, row: RowId, parent: RowId) -> Self {
        Self::new(ErrorKind::HierarchyOrder {
            table: table.into(),
            row,
            parent,
        })
    }

    /// Creates a cardinality violation error.
    #[must_use]
    pub fn cardinality(relationship: impl Into<String>, target: RowId, count: usize) -> Self {
        Self::new(ErrorKind::CardinalityViolation {
            relationship: relationship.into(),
            target,
            count,
        })
    }

    /// Creates a missing reference error for a required column.
    #[must_use]
    pub fn missing_reference(field: impl Into<String>, row: RowId) -> Self {
        Self::new(ErrorKind::MissingReference {
            field: field.into(),
            row,
        })
    }

    /// Creates an asymmetric partner error.
    #[must_use]
    pub fn asymmetric_partner(relationship: impl Into<String>, row: RowId) -> Self {
        Self::new(ErrorKind::AsymmetricPartner {
            relationship: relationship.into(),
            row,
        })
    }

    /// Creates a missing variant error.
    #[must_use]
    pub fn missing_variant(column: impl Into<String>, row: RowId) -> Self {
        Self::new(ErrorKind::MissingVariant {
            column: column.into(),
            row,
        })
    }

    /// Creates a label mismatch error.
    #[must_use]
    pub fn label_mismatch(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LabelMismatch {
            table: table.into(),
            message: message.into(),
        })
    }

    /// Creates an unlabeled row error.
    #[must_use]
    pub fn unlabeled(table: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Unlabeled {
            table: table.into(),
            position,
        })
    }

    /// Returns true if this is an [`ErrorKind::OutOfRange`] error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::OutOfRange { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A positional accessor was given a position outside the table.
    #[error("position {position} out of range for table {table} (length {length})")]
    OutOfRange {
        /// The table that was accessed.
        table: String,
        /// The requested position.
        position: usize,
        /// The table's length.
        length: usize,
    },

    /// A reference field points past the end of its target table.
    #[error("dangling reference: {field} of row {row} points at {target}[{position}] (length {length})")]
    DanglingReference {
        /// The referencing column.
        field: String,
        /// The row holding the bad reference.
        row: RowId,
        /// The target table.
        target: String,
        /// The referenced position.
        position: usize,
        /// The target table's length.
        length: usize,
    },

    /// A required reference column holds no reference.
    #[error("missing reference: {field} of row {row} is required")]
    MissingReference {
        /// The referencing column.
        field: String,
        /// The row with no reference.
        row: RowId,
    },

    /// A self-referential table is not stored in depth-first pre-order.
    #[error("hierarchy order violated in {table}: row {row} has parent {parent} at or after it")]
    HierarchyOrder {
        /// The hierarchical table.
        table: String,
        /// The row whose parent is misplaced.
        row: RowId,
        /// The parent's position.
        parent: RowId,
    },

    /// A one-to-one relationship references one target more than once.
    #[error("cardinality violation in {relationship}: target {target} referenced {count} times")]
    CardinalityViolation {
        /// The relationship name.
        relationship: String,
        /// The over-referenced target row.
        target: RowId,
        /// How many source rows reference it.
        count: usize,
    },

    /// A one-to-one pair does not resolve back to itself.
    #[error("asymmetric partner in {relationship}: row {row} is not its partner's partner")]
    AsymmetricPartner {
        /// The relationship name.
        relationship: String,
        /// The row whose round trip fails.
        row: RowId,
    },

    /// A non-optional variant column holds no candidate.
    #[error("missing variant: {column} of row {row} is not optional")]
    MissingVariant {
        /// The variant column.
        column: String,
        /// The row holding none.
        row: RowId,
    },

    /// A variant value names a tag outside the column's candidate set.
    #[error("unknown variant tag in {column} at row {row}: {tag}")]
    UnknownVariant {
        /// The variant column.
        column: String,
        /// The offending row.
        row: RowId,
        /// Debug rendering of the tag.
        tag: String,
    },

    /// A label set is not a valid mapping onto its table.
    #[error("label mismatch in {table}: {message}")]
    LabelMismatch {
        /// The labeled table.
        table: String,
        /// What is wrong with the mapping.
        message: String,
    },

    /// A row carries no label in a partial label mapping.
    #[error("row {position} of {table} has no label")]
    Unlabeled {
        /// The labeled table.
        table: String,
        /// The unlabeled position.
        position: usize,
    },

    /// A table was declared with more rows than a row id can address.
    #[error("table {table} has {rows} rows, more than a row id can address")]
    Capacity {
        /// The table name.
        table: String,
        /// The number of rows supplied.
        rows: usize,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Table the operation was working on.
    pub table: Option<String>,
    /// Column the operation was working on.
    pub column: Option<String>,
    /// Stack of construction steps.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the table.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Sets the column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "at {table}")?;
            if let Some(column) = &self.column {
                write!(f, ".{column}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for Sealtable operations.
pub type Result<T> = std::result::Result<T, Error>;
