//! Sorted per-column indices.
//!
//! An [`Index`] is built once over a fully populated table. It keeps the
//! table's positions sorted by column value with a stable sort, so rows with
//! equal values stay in table order. Lookups binary-search for the first
//! position `>= start` and the first position `> stop`, so `find` and
//! `range_by_value` cost O(log n + k). `range` also sorts its k matches back
//! into table order, O(log n + k log k).
//!
//! - [`Index::find`] returns the rows equal to one value, in table order
//! - [`Index::range`] returns the rows in a closed interval, in table order
//! - [`Index::range_by_value`] returns the same rows ascending by value, ties
//!   in table order

use std::cmp::Ordering;
use std::fmt;

use sealtable_foundation::{IndexKey, RowId, TableId};
use tracing::{debug, trace};

use crate::rows::Rows;
use crate::table::Table;

/// A value-sorted index over one column of a table.
#[derive(Clone)]
pub struct Index<K> {
    table: TableId,
    keys: Box<[K]>,
    order: Box<[RowId]>,
}

impl<K: IndexKey> Index<K> {
    /// Builds an index over every row of `table`.
    pub fn build<R>(table: &Table<R>, column: impl Fn(&R) -> K) -> Self {
        Self::build_filtered(table, |record| Some(column(record)))
    }

    /// Builds an index over the rows for which `column` returns a value.
    ///
    /// Rows mapped to `None` are left out, which is how optional reference
    /// columns skip their absent entries.
    pub fn build_filtered<R>(table: &Table<R>, column: impl Fn(&R) -> Option<K>) -> Self {
        let mut entries: Vec<(K, RowId)> = table
            .rows()
            .filter_map(|(row, record)| column(record).map(|key| (key, row)))
            .collect();
        // stable: equal keys keep ascending row order
        entries.sort_by(|a, b| a.0.compare(&b.0));

        let (keys, order): (Vec<K>, Vec<RowId>) = entries.into_iter().unzip();
        debug!(
            table = %table.name(),
            rows = table.len(),
            indexed = order.len(),
            "index.build"
        );
        Self {
            table: table.id(),
            keys: keys.into_boxed_slice(),
            order: order.into_boxed_slice(),
        }
    }

    /// Returns the id of the table this index was built over.
    #[must_use]
    pub fn table_id(&self) -> TableId {
        self.table
    }

    /// Returns the number of indexed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no rows are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the indexed keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// First sorted slot whose key is `>= start`.
    fn lower_bound(&self, start: &K) -> usize {
        self.keys
            .partition_point(|key| key.compare(start) == Ordering::Less)
    }

    /// First sorted slot whose key is `> stop`.
    fn upper_bound(&self, stop: &K) -> usize {
        self.keys
            .partition_point(|key| key.compare(stop) != Ordering::Greater)
    }

    /// Sorted slots covering the closed interval `[start, stop]`.
    fn span(&self, start: &K, stop: &K) -> (usize, usize) {
        if start.compare(stop) == Ordering::Greater {
            return (0, 0);
        }
        let lo = self.lower_bound(start);
        let hi = self.upper_bound(stop);
        (lo, hi.max(lo))
    }

    fn check_table<R>(&self, table: &Table<R>) {
        debug_assert_eq!(
            self.table,
            table.id(),
            "index built over another table than {}",
            table.name()
        );
    }

    /// Returns the positions of rows equal to `value`, in table order.
    #[must_use]
    pub fn find_ids(&self, value: &K) -> &[RowId] {
        let (lo, hi) = self.span(value, value);
        &self.order[lo..hi]
    }

    /// Returns the rows whose column equals `value`, in table order.
    ///
    /// An empty result means nothing matched.
    pub fn find<'a, R>(&'a self, table: &'a Table<R>, value: &K) -> Rows<'a, R> {
        self.check_table(table);
        let ids = self.find_ids(value);
        trace!(table = %table.name(), matches = ids.len(), "index.find");
        Rows::borrowed(table, ids)
    }

    /// Returns the first row equal to `value`, if any.
    pub fn find_first<'a, R>(&self, table: &'a Table<R>, value: &K) -> Option<&'a R> {
        self.check_table(table);
        self.find_ids(value).first().map(|row| table.row(*row))
    }

    /// Returns true if some row equals `value`.
    #[must_use]
    pub fn contains(&self, value: &K) -> bool {
        !self.find_ids(value).is_empty()
    }

    /// Returns the rows whose column lies in `[start, stop]`, in table order.
    ///
    /// The matches are re-sorted by position, so this costs O(log n + k log k).
    /// If `stop < start` the result is empty; the bounds are never swapped.
    pub fn range<'a, R>(&'a self, table: &'a Table<R>, start: &K, stop: &K) -> Rows<'a, R> {
        self.check_table(table);
        let (lo, hi) = self.span(start, stop);
        let mut ids = self.order[lo..hi].to_vec();
        ids.sort_unstable();
        trace!(table = %table.name(), matches = ids.len(), "index.range");
        Rows::owned(table, ids)
    }

    /// Returns the rows whose column lies in `[start, stop]`, ascending by
    /// value with ties in table order.
    pub fn range_by_value<'a, R>(
        &'a self,
        table: &'a Table<R>,
        start: &K,
        stop: &K,
    ) -> Rows<'a, R> {
        self.check_table(table);
        let (lo, hi) = self.span(start, stop);
        trace!(table = %table.name(), matches = hi - lo, "index.range_by_value");
        Rows::borrowed(table, &self.order[lo..hi])
    }

    /// Counts the rows whose column lies in `[start, stop]`.
    #[must_use]
    pub fn count_range(&self, start: &K, stop: &K) -> usize {
        let (lo, hi) = self.span(start, stop);
        hi - lo
    }

    /// Returns every indexed row ascending by value, ties in table order.
    pub fn iter_sorted<'a, R>(&'a self, table: &'a Table<R>) -> Rows<'a, R> {
        self.check_table(table);
        Rows::borrowed(table, &self.order)
    }

    /// Returns the first row holding the smallest value.
    pub fn min<'a, R>(&self, table: &'a Table<R>) -> Option<&'a R> {
        self.check_table(table);
        self.order.first().map(|row| table.row(*row))
    }

    /// Returns the last row, in table order, holding the largest value.
    pub fn max<'a, R>(&self, table: &'a Table<R>) -> Option<&'a R> {
        self.check_table(table);
        self.order.last().map(|row| table.row(*row))
    }
}

impl<K> fmt::Debug for Index<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("table", &self.table)
            .field("len", &self.order.len())
            .finish()
    }
}
