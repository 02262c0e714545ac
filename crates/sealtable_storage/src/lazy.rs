//! Indices built on first use.
//!
//! A [`LazyIndex`] defers building until a query needs it. The build runs at
//! most once even when several threads ask at the same time; every later
//! access is a plain read of the finished index.

use std::fmt;
use std::sync::OnceLock;

use sealtable_foundation::IndexKey;
use tracing::debug;

use crate::index::Index;
use crate::table::Table;

type Column<R, K> = Box<dyn Fn(&R) -> Option<K> + Send + Sync>;

/// An index over a column, built once on first access.
pub struct LazyIndex<R, K> {
    column: Column<R, K>,
    cell: OnceLock<Index<K>>,
}

impl<R, K: IndexKey> LazyIndex<R, K> {
    /// Creates a lazy index over every row.
    pub fn new(column: impl Fn(&R) -> K + Send + Sync + 'static) -> Self {
        Self::filtered(move |record| Some(column(record)))
    }

    /// Creates a lazy index over rows for which `column` returns a value.
    pub fn filtered(column: impl Fn(&R) -> Option<K> + Send + Sync + 'static) -> Self {
        Self {
            column: Box::new(column),
            cell: OnceLock::new(),
        }
    }

    /// Returns the index, building it over `table` if this is the first use.
    ///
    /// Concurrent first callers block until the single build finishes.
    pub fn get(&self, table: &Table<R>) -> &Index<K> {
        self.cell.get_or_init(|| {
            debug!(table = %table.name(), "index.lazy_build");
            Index::build_filtered(table, &self.column)
        })
    }

    /// Builds the index now if it has not been built yet.
    pub fn force(&self, table: &Table<R>) {
        let _ = self.get(table);
    }

    /// Returns the index if it has already been built.
    #[must_use]
    pub fn built(&self) -> Option<&Index<K>> {
        self.cell.get()
    }

    /// Returns true if the index has been built.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<R, K> fmt::Debug for LazyIndex<R, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyIndex")
            .field("built", &self.cell.get().is_some())
            .finish_non_exhaustive()
    }
}
