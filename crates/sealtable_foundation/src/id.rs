//! Row and table identifiers, and typed references between rows.
//!
//! References are index-based: a [`Ref<T>`] stores the position of a row in
//! its target table, never an address. Tables can therefore be moved or
//! rebuilt without invalidating the references that point into them.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of a table, assigned by whoever declares the table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableId(pub u32);

impl TableId {
    /// Creates a table identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table#{}", self.0)
    }
}

/// Position of a row inside its table.
///
/// Row ids are dense: a table of length `n` has exactly the ids `0..n`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowId(pub u32);

impl RowId {
    /// The largest number of rows a single table may hold.
    pub const MAX_ROWS: usize = u32::MAX as usize;

    /// Creates a row id from a raw position.
    #[must_use]
    pub const fn new(position: u32) -> Self {
        Self(position)
    }

    /// Returns the position as a `usize`, suitable for slice indexing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Converts a slice position into a row id.
    ///
    /// Returns `None` if the position does not fit in a row id.
    #[must_use]
    pub fn from_index(position: usize) -> Option<Self> {
        u32::try_from(position).ok().map(Self)
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({})", self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<RowId> for usize {
    fn from(row: RowId) -> Self {
        row.index()
    }
}

/// A table-qualified row identity.
///
/// Two rows are the same row exactly when both their table and their
/// position match.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowAddr {
    /// The table holding the row.
    pub table: TableId,
    /// The row's position in that table.
    pub row: RowId,
}

impl RowAddr {
    /// Creates a row address.
    #[must_use]
    pub const fn new(table: TableId, row: RowId) -> Self {
        Self { table, row }
    }
}

impl fmt::Debug for RowAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowAddr({}, {})", self.table, self.row)
    }
}

/// A non-owning reference to one row of a `Table<T>`.
///
/// `Ref<T>` is `Copy`, ordered and hashable whatever `T` is. It never keeps
/// the referenced row alive and never implies ownership.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct Ref<T> {
    row: RowId,
    #[cfg_attr(feature = "serde", serde(skip))]
    _target: PhantomData<fn() -> T>,
}

/// A reference that may be explicitly absent.
pub type OptRef<T> = Option<Ref<T>>;

impl<T> Ref<T> {
    /// Creates a reference to the row at `row`.
    #[must_use]
    pub const fn new(row: RowId) -> Self {
        Self {
            row,
            _target: PhantomData,
        }
    }

    /// Creates a reference from a raw position.
    ///
    /// Intended for `const` table definitions, where positions are literals.
    #[must_use]
    pub const fn at(position: u32) -> Self {
        Self::new(RowId(position))
    }

    /// Returns the referenced row's position.
    #[must_use]
    pub const fn row(self) -> RowId {
        self.row
    }

    /// Returns the referenced row's position as a `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row.index()
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ref<T> {}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
    }
}

impl<T> Eq for Ref<T> {}

impl<T> PartialOrd for Ref<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ref<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row)
    }
}

impl<T> Hash for Ref<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({})", self.row.0)
    }
}

impl<T> From<Ref<T>> for RowId {
    fn from(r: Ref<T>) -> Self {
        r.row
    }
}

impl<T> From<RowId> for Ref<T> {
    fn from(row: RowId) -> Self {
        Self::new(row)
    }
}
