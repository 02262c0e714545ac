//! Lazy result sequences over a table.
//!
//! Every query returns [`Rows`]: a list of positions into one table that is
//! resolved to records only as the caller pulls them. Exact-match results
//! borrow straight from an index; results that had to be reordered own
//! their positions.

use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;

use sealtable_foundation::RowId;

use crate::table::Table;

/// An iterator over selected rows of a table.
pub struct Rows<'a, R> {
    table: &'a Table<R>,
    ids: Cow<'a, [RowId]>,
    front: usize,
    back: usize,
}

impl<'a, R> Rows<'a, R> {
    /// Creates an iterator over positions borrowed from an index.
    #[must_use]
    pub fn borrowed(table: &'a Table<R>, ids: &'a [RowId]) -> Self {
        Self {
            table,
            back: ids.len(),
            ids: Cow::Borrowed(ids),
            front: 0,
        }
    }

    /// Creates an iterator over owned positions.
    #[must_use]
    pub fn owned(table: &'a Table<R>, ids: Vec<RowId>) -> Self {
        Self {
            table,
            back: ids.len(),
            ids: Cow::Owned(ids),
            front: 0,
        }
    }

    /// Creates an iterator that yields nothing.
    #[must_use]
    pub fn empty(table: &'a Table<R>) -> Self {
        Self::borrowed(table, &[])
    }

    /// Returns the table the rows belong to.
    #[must_use]
    pub fn table(&self) -> &'a Table<R> {
        self.table
    }

    /// Returns the positions not yet yielded.
    #[must_use]
    pub fn ids(&self) -> &[RowId] {
        &self.ids[self.front..self.back]
    }

    /// Returns true if no rows remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front == self.back
    }

    /// Pairs each remaining record with its position.
    pub fn with_ids(self) -> impl DoubleEndedIterator<Item = (RowId, &'a R)> + ExactSizeIterator {
        let table = self.table;
        let ids = match self.ids {
            Cow::Borrowed(ids) => ids[self.front..self.back].to_vec(),
            Cow::Owned(mut ids) => {
                ids.truncate(self.back);
                ids.drain(..self.front);
                ids
            }
        };
        ids.into_iter().map(move |id| (id, table.row(id)))
    }
}

impl<'a, R> Iterator for Rows<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<&'a R> {
        if self.front == self.back {
            return None;
        }
        let id = self.ids[self.front];
        self.front += 1;
        Some(self.table.row(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<R> DoubleEndedIterator for Rows<'_, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.table.row(self.ids[self.back]))
    }
}

impl<R> ExactSizeIterator for Rows<'_, R> {}

impl<R> FusedIterator for Rows<'_, R> {}

impl<R> Clone for Rows<'_, R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            ids: self.ids.clone(),
            front: self.front,
            back: self.back,
        }
    }
}

impl<R> fmt::Debug for Rows<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rows")
            .field("table", &self.table.name())
            .field("ids", &self.ids())
            .finish()
    }
}
