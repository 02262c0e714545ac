//! Self-referential tables stored in depth-first pre-order.
//!
//! A hierarchical table has an optional parent column pointing into the
//! same table. Construction checks that every parent sits at an earlier
//! position than its children. With that in place, subtree membership is
//! one forward scan: a row belongs to the subtree exactly when its parent
//! already does.

use std::fmt;

use sealtable_foundation::{BuildConfig, Error, ErrorContext, OptRef, Ref, Result, RowId};
use sealtable_storage::{Rows, Table};
use tracing::{debug, trace};

use crate::check;
use crate::relationship::Relationship;
use crate::schema::RelationshipSchema;

/// A validated parent column over a pre-ordered table.
pub struct Hierarchy<T> {
    parent: Relationship<T, T>,
}

impl<T: 'static> Hierarchy<T> {
    /// Builds a hierarchy with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`Hierarchy::build_with`].
    pub fn build(
        name: impl Into<String>,
        table: &Table<T>,
        parent: impl Fn(&T) -> OptRef<T> + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::build_with(BuildConfig::default(), name, table, parent)
    }

    /// Builds a hierarchy over `table`'s parent column.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent reference dangles, or if a row's parent
    /// is stored at or after the row itself.
    pub fn build_with(
        config: BuildConfig,
        name: impl Into<String>,
        table: &Table<T>,
        parent: impl Fn(&T) -> OptRef<T> + Send + Sync + 'static,
    ) -> Result<Self> {
        let schema = RelationshipSchema::new(name).optional();
        let parent = Relationship::build_with(config, schema, table, table, parent)?;

        check::run(config.validation, "hierarchy", || {
            pre_ordered(&parent, table).map_err(|err| {
                err.with_context(
                    ErrorContext::new()
                        .with_table(table.name())
                        .with_column(parent.name())
                        .with_frame("hierarchy.build"),
                )
            })
        })?;

        debug!(
            table = %table.name(),
            column = %parent.name(),
            rows = table.len(),
            "hierarchy.build"
        );
        Ok(Self { parent })
    }

    /// Returns the underlying parent relationship.
    #[must_use]
    pub fn relationship(&self) -> &Relationship<T, T> {
        &self.parent
    }

    /// Reads the parent reference of `record`.
    #[must_use]
    pub fn parent_ref(&self, record: &T) -> OptRef<T> {
        self.parent.field(record)
    }

    /// Returns the parent of `record`, or `None` for a root.
    #[must_use]
    pub fn parent<'a>(&self, table: &'a Table<T>, record: &T) -> Option<&'a T> {
        self.parent.resolve(table, record)
    }

    /// Returns the direct children of `row`, in table order.
    pub fn children<'a>(&'a self, table: &'a Table<T>, row: Ref<T>) -> Rows<'a, T> {
        self.parent.reverse(table, row)
    }

    /// Returns the rows without a parent, in table order.
    pub fn roots<'a>(&self, table: &'a Table<T>) -> Rows<'a, T> {
        let ids = table
            .rows()
            .filter(|(_, record)| self.parent_ref(record).is_none())
            .map(|(row, _)| row)
            .collect();
        Rows::owned(table, ids)
    }

    /// Walks from `row` up to its root, nearest ancestor first.
    ///
    /// `row` itself is not included.
    pub fn ancestors<'a>(
        &'a self,
        table: &'a Table<T>,
        row: Ref<T>,
    ) -> impl Iterator<Item = Ref<T>> + 'a {
        let mut current = self.parent_ref(table.resolve(row));
        std::iter::from_fn(move || {
            let step = current?;
            current = self.parent_ref(table.resolve(step));
            Some(step)
        })
    }

    /// Returns the number of ancestors of `row`. Roots have depth 0.
    #[must_use]
    pub fn depth(&self, table: &Table<T>, row: Ref<T>) -> usize {
        self.ancestors(table, row).count()
    }

    /// Returns true if `row` is `ancestor` or lies below it.
    #[must_use]
    pub fn contains(&self, table: &Table<T>, ancestor: Ref<T>, row: Ref<T>) -> bool {
        if row == ancestor {
            return true;
        }
        // Parents precede children, so the walk can stop once it passes `ancestor`.
        self.ancestors(table, row)
            .take_while(|step| *step >= ancestor)
            .any(|step| step == ancestor)
    }

    /// Returns `roots` and every row below them, in table order.
    ///
    /// Runs in one forward scan: a row joins the set when its parent is
    /// already in it.
    pub fn subtree<'a>(
        &self,
        table: &'a Table<T>,
        roots: impl IntoIterator<Item = Ref<T>>,
    ) -> Rows<'a, T> {
        let members = self.propagate(table, roots);
        let ids = members
            .iter()
            .enumerate()
            .filter(|(_, member)| **member)
            .filter_map(|(position, _)| RowId::from_index(position))
            .collect();
        Rows::owned(table, ids)
    }

    /// Returns every row below `roots`, in table order.
    ///
    /// A supplied root appears only when it lies below another supplied
    /// root.
    pub fn descendants<'a>(
        &self,
        table: &'a Table<T>,
        roots: impl IntoIterator<Item = Ref<T>>,
    ) -> Rows<'a, T> {
        let members = self.propagate(table, roots);
        // A row lies below some root exactly when its parent is in the subtree.
        let ids = table
            .rows()
            .filter(|(_, record)| {
                self.parent_ref(record)
                    .is_some_and(|parent| members.get(parent.index()).copied().unwrap_or(false))
            })
            .map(|(row, _)| row)
            .collect();
        Rows::owned(table, ids)
    }

    /// Returns `roots` and every row below them by recursing through
    /// [`Hierarchy::children`], in walk order.
    ///
    /// Slower than [`Hierarchy::subtree`] and independent of the table's
    /// ordering.
    pub fn subtree_recursive<'a>(
        &'a self,
        table: &'a Table<T>,
        roots: impl IntoIterator<Item = Ref<T>>,
    ) -> Rows<'a, T> {
        let mut ids = Vec::new();
        for root in roots {
            self.walk(table, root.row(), &mut ids);
        }
        Rows::owned(table, ids)
    }

    fn walk(&self, table: &Table<T>, row: RowId, out: &mut Vec<RowId>) {
        if out.contains(&row) {
            return;
        }
        out.push(row);
        for &child in self.children(table, Ref::new(row)).ids() {
            self.walk(table, child, out);
        }
    }

    fn propagate(&self, table: &Table<T>, roots: impl IntoIterator<Item = Ref<T>>) -> Vec<bool> {
        let mut members = vec![false; table.len()];
        let mut first = table.len();
        for root in roots {
            if let Some(member) = members.get_mut(root.index()) {
                *member = true;
                first = first.min(root.index());
            }
        }
        let mut count = 0usize;
        for (row, record) in table.rows().skip(first) {
            let joined = self
                .parent_ref(record)
                .is_some_and(|parent| members.get(parent.index()).copied().unwrap_or(false));
            if joined {
                members[row.index()] = true;
                count += 1;
            }
        }
        trace!(table = %table.name(), start = first, added = count, "hierarchy.propagate");
        members
    }
}

impl<T> fmt::Debug for Hierarchy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hierarchy").field("parent", &self.parent).finish()
    }
}

fn pre_ordered<T: 'static>(parent: &Relationship<T, T>, table: &Table<T>) -> Result<()> {
    for (row, record) in table.rows() {
        if let Some(up) = parent.field(record) {
            if up.row() >= row {
                return Err(Error::hierarchy_order(table.name(), row, up.row()));
            }
        }
    }
    Ok(())
}
