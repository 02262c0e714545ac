//! Contiguous, immutable storage for the records of one entity type.
//!
//! A table's row order is fixed when it is constructed. Row order is the
//! basis of insertion-order iteration, and hierarchical tables rely on it
//! being a depth-first pre-order of their parent references.

use std::fmt;
use std::ops;

use sealtable_foundation::{Error, ErrorKind, OptRef, Ref, Result, RowAddr, RowId, TableId};
use tracing::debug;

/// An ordered, fixed-length sequence of records.
///
/// Tables are never mutated after construction, so they are `Sync` whenever
/// `R` is and may be shared between threads without locking.
pub struct Table<R> {
    id: TableId,
    name: String,
    rows: Box<[R]>,
}

impl<R> Table<R> {
    /// Creates a table from records in their stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more rows than a [`RowId`] can address.
    pub fn new(
        id: TableId,
        name: impl Into<String>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self> {
        Self::from_vec(id, name, rows.into_iter().collect())
    }

    /// Creates a table from a vector of records in their stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more rows than a [`RowId`] can address.
    pub fn from_vec(id: TableId, name: impl Into<String>, rows: Vec<R>) -> Result<Self> {
        let name = name.into();
        if rows.len() > RowId::MAX_ROWS {
            return Err(Error::new(ErrorKind::Capacity {
                table: name,
                rows: rows.len(),
            }));
        }
        debug!(table = %name, id = id.0, rows = rows.len(), "table.build");
        Ok(Self {
            id,
            name,
            rows: rows.into_boxed_slice(),
        })
    }

    /// Returns the table's identity.
    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Returns the table's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the record at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfRange`] if `position` is not in `0..len()`.
    pub fn get(&self, position: usize) -> Result<&R> {
        self.rows
            .get(position)
            .ok_or_else(|| Error::out_of_range(self.name.as_str(), position, self.rows.len()))
    }

    /// Returns the record at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a position of this table. Row ids handed out
    /// by this table, its indices and validated relationships never are.
    #[must_use]
    pub fn row(&self, row: RowId) -> &R {
        &self.rows[row.index()]
    }

    /// Dereferences a reference field.
    ///
    /// # Panics
    ///
    /// Panics if the reference does not point into this table; references
    /// checked by a relationship built over this table always do.
    #[must_use]
    pub fn resolve(&self, reference: Ref<R>) -> &R {
        self.row(reference.row())
    }

    /// Dereferences an optional reference field.
    ///
    /// Explicit absence resolves to `None` rather than failing.
    #[must_use]
    pub fn resolve_opt(&self, reference: OptRef<R>) -> Option<&R> {
        reference.map(|r| self.resolve(r))
    }

    /// Creates a checked reference to the row at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfRange`] if `position` is not in `0..len()`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn reference(&self, position: usize) -> Result<Ref<R>> {
        if position < self.rows.len() {
            // len() <= MAX_ROWS was checked at construction
            Ok(Ref::at(position as u32))
        } else {
            Err(Error::out_of_range(
                self.name.as_str(),
                position,
                self.rows.len(),
            ))
        }
    }

    /// Returns the table-qualified address of `row`.
    #[must_use]
    pub fn addr(&self, row: RowId) -> RowAddr {
        RowAddr::new(self.id, row)
    }

    /// Recovers the position of a record borrowed from this table.
    ///
    /// Returns `None` if `record` does not live inside this table.
    #[must_use]
    pub fn position_of(&self, record: &R) -> Option<RowId> {
        let size = std::mem::size_of::<R>();
        if size == 0 {
            return None;
        }
        let base = self.rows.as_ptr() as usize;
        let addr = std::ptr::from_ref(record) as usize;
        let offset = addr.checked_sub(base)?;
        if offset % size != 0 {
            return None;
        }
        let index = offset / size;
        if index < self.rows.len() {
            RowId::from_index(index)
        } else {
            None
        }
    }

    /// Returns a reference to a record borrowed from this table.
    #[must_use]
    pub fn ref_of(&self, record: &R) -> Option<Ref<R>> {
        self.position_of(record).map(Ref::new)
    }

    /// Returns all records as a slice, in stored order.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.rows
    }

    /// Iterates over all records in stored order.
    ///
    /// The iterator is lazy and finite; call `iter` again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Iterates over `(RowId, &R)` pairs in stored order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = (RowId, &R)> + ExactSizeIterator {
        // len() <= MAX_ROWS was checked at construction
        self.rows
            .iter()
            .enumerate()
            .map(|(position, record)| (RowId(position as u32), record))
    }

    /// Iterates over every row id in stored order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn row_ids(&self) -> impl DoubleEndedIterator<Item = RowId> + ExactSizeIterator {
        (0..self.rows.len() as u32).map(RowId)
    }
}

impl<R> ops::Index<RowId> for Table<R> {
    type Output = R;

    fn index(&self, row: RowId) -> &R {
        self.row(row)
    }
}

impl<R> ops::Index<Ref<R>> for Table<R> {
    type Output = R;

    fn index(&self, reference: Ref<R>) -> &R {
        self.resolve(reference)
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("len", &self.rows.len())
            .finish()
    }
}
