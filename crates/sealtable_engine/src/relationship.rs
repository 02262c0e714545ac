//! Reference columns between tables, navigable in both directions.
//!
//! A [`Relationship`] describes one reference column of a source table that
//! points into a target table. Forward navigation (N-1) reads the stored
//! reference. Reverse navigation (1-N) goes through a sorted index over the
//! reference column, so the rows pointing at a target come back in the
//! source table's stored order.

use std::fmt;
use std::sync::Arc;

use sealtable_foundation::{BuildConfig, Error, ErrorContext, OptRef, Ref, Result, RowId, TableId};
use sealtable_storage::{Index, LazyIndex, Rows, Table};
use tracing::debug;

use crate::check;
use crate::schema::{Cardinality, RelationshipSchema};

type Field<S, T> = Arc<dyn Fn(&S) -> OptRef<T> + Send + Sync>;

/// A validated reference column from `S` rows to `T` rows.
pub struct Relationship<S, T> {
    schema: RelationshipSchema,
    source: TableId,
    target: TableId,
    field: Field<S, T>,
    reverse: LazyIndex<S, RowId>,
}

impl<S: 'static, T: 'static> Relationship<S, T> {
    /// Builds a relationship with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`Relationship::build_with`].
    pub fn build(
        schema: RelationshipSchema,
        source: &Table<S>,
        target: &Table<T>,
        field: impl Fn(&S) -> OptRef<T> + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::build_with(BuildConfig::default(), schema, source, target, field)
    }

    /// Builds a relationship over a column that always holds a reference.
    ///
    /// # Errors
    ///
    /// See [`Relationship::build_with`].
    pub fn required(
        schema: RelationshipSchema,
        source: &Table<S>,
        target: &Table<T>,
        field: impl Fn(&S) -> Ref<T> + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::build(schema, source, target, move |record| Some(field(record)))
    }

    /// Builds a relationship, validating the column against `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a reference points past the end of `target`
    /// - a required column holds no reference
    /// - a one-to-one column references a target row more than once
    pub fn build_with(
        config: BuildConfig,
        schema: RelationshipSchema,
        source: &Table<S>,
        target: &Table<T>,
        field: impl Fn(&S) -> OptRef<T> + Send + Sync + 'static,
    ) -> Result<Self> {
        let field: Field<S, T> = Arc::new(field);

        check::run(config.validation, "relationship", || {
            validate(&schema, source, target, field.as_ref()).map_err(|err| {
                err.with_context(
                    ErrorContext::new()
                        .with_table(source.name())
                        .with_column(schema.name.as_str())
                        .with_frame("relationship.build"),
                )
            })
        })?;

        let index_field = Arc::clone(&field);
        let reverse = LazyIndex::filtered(move |record: &S| index_field(record).map(Ref::row));
        if config.eager_indexes {
            reverse.force(source);
        }

        debug!(
            relationship = %schema.name,
            source = %source.name(),
            target = %target.name(),
            cardinality = ?schema.cardinality,
            optionality = ?schema.optionality,
            "relationship.build"
        );

        Ok(Self {
            schema,
            source: source.id(),
            target: target.id(),
            field,
            reverse,
        })
    }

    /// Returns the relationship's schema.
    #[must_use]
    pub fn schema(&self) -> &RelationshipSchema {
        &self.schema
    }

    /// Returns the relationship's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// Returns the id of the referencing table.
    #[must_use]
    pub fn source_id(&self) -> TableId {
        self.source
    }

    /// Returns the id of the referenced table.
    #[must_use]
    pub fn target_id(&self) -> TableId {
        self.target
    }

    /// Reads the stored reference of a source record.
    #[must_use]
    pub fn field(&self, record: &S) -> OptRef<T> {
        (self.field)(record)
    }

    /// Follows the reference of a source record (N-1).
    ///
    /// An absent optional reference resolves to `None`.
    #[must_use]
    pub fn resolve<'a>(&self, target: &'a Table<T>, record: &S) -> Option<&'a T> {
        debug_assert_eq!(self.target, target.id(), "{}: wrong target table", self.schema.name);
        target.resolve_opt(self.field(record))
    }

    /// Follows the reference stored in row `row` of the source table.
    #[must_use]
    pub fn resolve_row<'a>(
        &self,
        source: &Table<S>,
        target: &'a Table<T>,
        row: RowId,
    ) -> Option<&'a T> {
        self.resolve(target, source.row(row))
    }

    /// Returns the reverse index over the reference column.
    pub fn index(&self, source: &Table<S>) -> &Index<RowId> {
        debug_assert_eq!(self.source, source.id(), "{}: wrong source table", self.schema.name);
        self.reverse.get(source)
    }

    /// Returns the source rows that reference `target_row` (1-N), in source
    /// table order.
    pub fn reverse<'a>(&'a self, source: &'a Table<S>, target_row: Ref<T>) -> Rows<'a, S> {
        self.index(source).find(source, &target_row.row())
    }

    /// Returns the source rows that reference `record`, a row borrowed from
    /// `target`.
    ///
    /// A record that does not belong to `target` is referenced by nothing.
    pub fn reverse_of<'a>(
        &'a self,
        source: &'a Table<S>,
        target: &Table<T>,
        record: &T,
    ) -> Rows<'a, S> {
        match target.ref_of(record) {
            Some(reference) => self.reverse(source, reference),
            None => Rows::empty(source),
        }
    }

    /// Counts the source rows that reference `target_row`.
    pub fn referenced_count(&self, source: &Table<S>, target_row: Ref<T>) -> usize {
        self.index(source).find_ids(&target_row.row()).len()
    }

    /// Returns the target rows no source row references, in target order.
    pub fn unreferenced<'a>(
        &'a self,
        source: &'a Table<S>,
        target: &'a Table<T>,
    ) -> impl Iterator<Item = &'a T> + 'a {
        let index = self.index(source);
        target
            .rows()
            .filter(move |(row, _)| !index.contains(row))
            .map(|(_, record)| record)
    }
}

fn validate<S, T>(
    schema: &RelationshipSchema,
    source: &Table<S>,
    target: &Table<T>,
    field: &(dyn Fn(&S) -> OptRef<T> + Send + Sync),
) -> Result<()> {
    let mut counts = match schema.cardinality {
        Cardinality::OneToOne => vec![0usize; target.len()],
        Cardinality::ManyToOne => Vec::new(),
    };

    for (row, record) in source.rows() {
        let Some(reference) = field(record) else {
            if schema.is_optional() {
                continue;
            }
            return Err(Error::missing_reference(schema.name.as_str(), row));
        };
        if reference.index() >= target.len() {
            return Err(Error::dangling_reference(
                schema.name.as_str(),
                row,
                target.name(),
                reference.index(),
                target.len(),
            ));
        }
        if let Some(count) = counts.get_mut(reference.index()) {
            *count += 1;
            if *count > 1 {
                return Err(Error::cardinality(
                    schema.name.as_str(),
                    reference.row(),
                    *count,
                ));
            }
        }
    }
    Ok(())
}

impl<S, T> fmt::Debug for Relationship<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("schema", &self.schema)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("reverse", &self.reverse)
            .finish_non_exhaustive()
    }
}
