//! Tagged-union columns whose values point into one of several tables.
//!
//! The column's value type is a user enum with one variant per candidate
//! table, each holding a [`Ref`](sealtable_foundation::Ref) into that
//! table. Absence is `None`, allowed only for optional columns. Resolution
//! is an ordinary exhaustive `match` on the enum; this module validates the
//! column once and indexes it for the reverse queries.

use std::fmt;
use std::sync::Arc;

use sealtable_foundation::{BuildConfig, Error, ErrorContext, ErrorKind, Result, RowId, TableId};
use sealtable_storage::{Index, LazyIndex, Rows, Table};
use tracing::debug;

use crate::check;
use crate::schema::Optionality;

/// A closed sum type stored in a variant column.
///
/// ```
/// use sealtable_engine::Variant;
/// use sealtable_foundation::{Ref, RowId};
///
/// struct City;
/// struct Country;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// enum Place {
///     City(Ref<City>),
///     Country(Ref<Country>),
/// }
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// enum PlaceKind {
///     City,
///     Country,
/// }
///
/// impl Variant for Place {
///     type Tag = PlaceKind;
///     const TAGS: &'static [PlaceKind] = &[PlaceKind::City, PlaceKind::Country];
///
///     fn tag(&self) -> PlaceKind {
///         match self {
///             Place::City(_) => PlaceKind::City,
///             Place::Country(_) => PlaceKind::Country,
///         }
///     }
///
///     fn row(&self) -> RowId {
///         match self {
///             Place::City(r) => r.row(),
///             Place::Country(r) => r.row(),
///         }
///     }
/// }
/// ```
pub trait Variant: Copy + Eq + fmt::Debug {
    /// Names one candidate table.
    type Tag: Copy + Eq + fmt::Debug + 'static;

    /// Every candidate, in declaration order.
    const TAGS: &'static [Self::Tag];

    /// Returns which candidate table this value points into.
    fn tag(&self) -> Self::Tag;

    /// Returns the referenced position within the candidate table.
    fn row(&self) -> RowId;
}

/// Position of `tag` in the declared candidate list.
fn ordinal<V: Variant>(tag: V::Tag) -> Option<u32> {
    V::TAGS
        .iter()
        .position(|candidate| *candidate == tag)
        .and_then(|position| u32::try_from(position).ok())
}

fn key_of<V: Variant>(value: V) -> Option<(u32, RowId)> {
    ordinal::<V>(value.tag()).map(|ord| (ord, value.row()))
}

type Field<S, V> = Arc<dyn Fn(&S) -> Option<V> + Send + Sync>;

/// A validated variant column of `S` rows.
pub struct VariantColumn<S, V> {
    name: String,
    source: TableId,
    optionality: Optionality,
    field: Field<S, V>,
    index: LazyIndex<S, (u32, RowId)>,
}

impl<S: 'static, V: Variant + 'static> VariantColumn<S, V> {
    /// Builds a variant column with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`VariantColumn::build_with`].
    pub fn build(
        name: impl Into<String>,
        source: &Table<S>,
        optionality: Optionality,
        lengths: impl Fn(V::Tag) -> usize,
        field: impl Fn(&S) -> Option<V> + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::build_with(BuildConfig::default(), name, source, optionality, lengths, field)
    }

    /// Builds a variant column, validating it against the candidate tables.
    ///
    /// `lengths` gives the row count of each candidate table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a value's tag is not listed in [`Variant::TAGS`]
    /// - a value points past the end of its candidate table
    /// - a required column holds `None`
    pub fn build_with(
        config: BuildConfig,
        name: impl Into<String>,
        source: &Table<S>,
        optionality: Optionality,
        lengths: impl Fn(V::Tag) -> usize,
        field: impl Fn(&S) -> Option<V> + Send + Sync + 'static,
    ) -> Result<Self> {
        let name = name.into();
        let field: Field<S, V> = Arc::new(field);

        check::run(config.validation, "variant", || {
            validate(&name, source, optionality, &lengths, field.as_ref()).map_err(|err| {
                err.with_context(
                    ErrorContext::new()
                        .with_table(source.name())
                        .with_column(name.as_str())
                        .with_frame("variant.build"),
                )
            })
        })?;

        let index_field = Arc::clone(&field);
        let index =
            LazyIndex::filtered(move |record: &S| index_field(record).and_then(key_of::<V>));
        if config.eager_indexes {
            index.force(source);
        }

        debug!(
            column = %name,
            source = %source.name(),
            candidates = V::TAGS.len(),
            optionality = ?optionality,
            "variant.build"
        );

        Ok(Self {
            name,
            source: source.id(),
            optionality,
            field,
            index,
        })
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the table holding the column.
    #[must_use]
    pub fn source_id(&self) -> TableId {
        self.source
    }

    /// Returns true if the column may hold `None`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optionality == Optionality::Optional
    }

    /// Returns the value stored in `record`.
    #[must_use]
    pub fn resolve_variant(&self, record: &S) -> Option<V> {
        (self.field)(record)
    }

    fn index(&self, source: &Table<S>) -> &Index<(u32, RowId)> {
        debug_assert_eq!(self.source, source.id(), "{}: wrong source table", self.name);
        self.index.get(source)
    }

    /// Returns the rows whose value equals `value`, in table order.
    pub fn referencing<'a>(&'a self, source: &'a Table<S>, value: V) -> Rows<'a, S> {
        match key_of(value) {
            Some(key) => self.index(source).find(source, &key),
            None => Rows::empty(source),
        }
    }

    /// Returns the rows pointing into the `tag` candidate table, in table
    /// order.
    ///
    /// A candidate nobody points into yields an empty sequence.
    pub fn all_of_type<'a>(&'a self, source: &'a Table<S>, tag: V::Tag) -> Rows<'a, S> {
        match ordinal::<V>(tag) {
            Some(ord) => self
                .index(source)
                .range(source, &(ord, RowId(0)), &(ord, RowId(u32::MAX))),
            None => Rows::empty(source),
        }
    }

    /// Counts the rows pointing into the `tag` candidate table.
    pub fn count_of_type(&self, source: &Table<S>, tag: V::Tag) -> usize {
        ordinal::<V>(tag).map_or(0, |ord| {
            self.index(source)
                .count_range(&(ord, RowId(0)), &(ord, RowId(u32::MAX)))
        })
    }

    /// Returns the rows holding `None`, in table order.
    pub fn none_rows<'a>(&self, source: &'a Table<S>) -> Rows<'a, S> {
        let ids = source
            .rows()
            .filter(|(_, record)| self.resolve_variant(record).is_none())
            .map(|(row, _)| row)
            .collect();
        Rows::owned(source, ids)
    }
}

fn validate<S, V: Variant>(
    name: &str,
    source: &Table<S>,
    optionality: Optionality,
    lengths: &impl Fn(V::Tag) -> usize,
    field: &(dyn Fn(&S) -> Option<V> + Send + Sync),
) -> Result<()> {
    let lengths: Vec<usize> = V::TAGS.iter().map(|tag| lengths(*tag)).collect();

    for (row, record) in source.rows() {
        let Some(value) = field(record) else {
            if optionality == Optionality::Optional {
                continue;
            }
            return Err(Error::missing_variant(name, row));
        };
        let Some(ord) = ordinal::<V>(value.tag()) else {
            return Err(Error::new(ErrorKind::UnknownVariant {
                column: name.to_string(),
                row,
                tag: format!("{:?}", value.tag()),
            }));
        };
        let length = lengths[ord as usize];
        if value.row().index() >= length {
            return Err(Error::dangling_reference(
                name,
                row,
                format!("{:?}", value.tag()),
                value.row().index(),
                length,
            ));
        }
    }
    Ok(())
}

impl<S, V> fmt::Debug for VariantColumn<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantColumn")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("optionality", &self.optionality)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
