//! Symbolic names for rows, and correlation with data held elsewhere.
//!
//! A [`Label`] is a closed enumeration whose constants each name one row of
//! a table. [`LabelMap`] checks the mapping once and answers lookups in both
//! directions. [`ExternalKeys`] attaches a second key to each label so that
//! records the engine does not own (user-edited rows in a database, say)
//! can be joined back to labeled rows.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use sealtable_foundation::{Error, Result, RowId, TableId};
use sealtable_storage::Table;
use tracing::debug;

/// A closed enumeration of row names.
///
/// Usually implemented on a fieldless enum whose discriminants are the row
/// positions:
///
/// ```
/// use sealtable_engine::Label;
/// use sealtable_foundation::RowId;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Element {
///     Hydrogen,
///     Helium,
/// }
///
/// impl Label for Element {
///     const ALL: &'static [Self] = &[Element::Hydrogen, Element::Helium];
///
///     fn position(self) -> RowId {
///         RowId(self as u32)
///     }
/// }
/// ```
pub trait Label: Copy + Eq + Hash + Debug + 'static {
    /// Every label.
    const ALL: &'static [Self];

    /// Returns the position of the row this label names.
    fn position(self) -> RowId;
}

/// A validated mapping between labels and the rows of one table.
#[derive(Clone)]
pub struct LabelMap<L> {
    table: TableId,
    name: String,
    by_position: Box<[Option<L>]>,
}

impl<L: Label> LabelMap<L> {
    /// Builds a mapping in which every row carries exactly one label.
    ///
    /// # Errors
    ///
    /// Returns an error if a label points past the end of `table`, two
    /// labels share a row, or a row has no label.
    pub fn build<R>(table: &Table<R>) -> Result<Self> {
        let map = Self::build_partial(table)?;
        if let Some(position) = map.by_position.iter().position(Option::is_none) {
            return Err(Error::label_mismatch(
                table.name(),
                format!("row {position} has no label"),
            ));
        }
        Ok(map)
    }

    /// Builds a mapping in which some rows may carry no label.
    ///
    /// # Errors
    ///
    /// Returns an error if a label points past the end of `table` or two
    /// labels share a row.
    pub fn build_partial<R>(table: &Table<R>) -> Result<Self> {
        let mut by_position = vec![None; table.len()].into_boxed_slice();
        for &label in L::ALL {
            let position = label.position().index();
            let Some(slot) = by_position.get_mut(position) else {
                return Err(Error::label_mismatch(
                    table.name(),
                    format!("{label:?} names row {position} of {}", table.len()),
                ));
            };
            if let Some(previous) = slot.replace(label) {
                return Err(Error::label_mismatch(
                    table.name(),
                    format!("{previous:?} and {label:?} both name row {position}"),
                ));
            }
        }
        debug!(table = %table.name(), labels = L::ALL.len(), rows = table.len(), "label.build");
        Ok(Self {
            table: table.id(),
            name: table.name().to_string(),
            by_position,
        })
    }

    /// Returns the label of the row at `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is outside the table or the row has no
    /// label.
    pub fn label_of(&self, position: usize) -> Result<L> {
        match self.by_position.get(position) {
            Some(Some(label)) => Ok(*label),
            Some(None) => Err(Error::unlabeled(self.name.as_str(), position)),
            None => Err(Error::out_of_range(
                self.name.as_str(),
                position,
                self.by_position.len(),
            )),
        }
    }

    /// Returns the row position named by `label`.
    #[must_use]
    pub fn position_of(&self, label: L) -> RowId {
        label.position()
    }

    /// Returns the row named by `label`.
    #[must_use]
    pub fn get<'a, R>(&self, table: &'a Table<R>, label: L) -> &'a R {
        debug_assert_eq!(self.table, table.id(), "{}: wrong table", self.name);
        table.row(label.position())
    }

    /// Returns the label of `record`, a row borrowed from `table`.
    #[must_use]
    pub fn label_of_record<R>(&self, table: &Table<R>, record: &R) -> Option<L> {
        let row = table.position_of(record)?;
        self.by_position.get(row.index()).copied().flatten()
    }

    /// Returns every label.
    #[must_use]
    pub fn labels(&self) -> &'static [L] {
        L::ALL
    }

    /// Returns the number of rows in the labeled table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    /// Returns true if the labeled table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    /// Returns true if every row carries a label.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.by_position.iter().all(Option::is_some)
    }
}

impl<L: Debug> Debug for LabelMap<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelMap")
            .field("table", &self.table)
            .field("name", &self.name)
            .field("rows", &self.by_position.len())
            .finish()
    }
}

/// A second, caller-chosen key attached to every label.
///
/// The key need not match the row position. Lookups against caller data
/// go through [`ExternalKeys::find_external`] (a linear scan) or an
/// [`ExternalIndex`] (a hash map built once).
#[derive(Clone, Debug)]
pub struct ExternalKeys<L, K> {
    by_label: HashMap<L, K>,
    by_key: HashMap<K, L>,
}

impl<L: Label, K: Clone + Eq + Hash + Debug> ExternalKeys<L, K> {
    /// Computes the external key of every label.
    ///
    /// # Errors
    ///
    /// Returns an error if two labels map to the same key.
    pub fn new(name: &str, key_of: impl Fn(L) -> K) -> Result<Self> {
        let mut by_label = HashMap::with_capacity(L::ALL.len());
        let mut by_key = HashMap::with_capacity(L::ALL.len());
        for &label in L::ALL {
            let key = key_of(label);
            if let Some(previous) = by_key.insert(key.clone(), label) {
                return Err(Error::label_mismatch(
                    name,
                    format!("{previous:?} and {label:?} share external key {key:?}"),
                ));
            }
            by_label.insert(label, key);
        }
        Ok(Self { by_label, by_key })
    }

    /// Returns the external key of `label`.
    #[must_use]
    pub fn key_of(&self, label: L) -> Option<&K> {
        self.by_label.get(&label)
    }

    /// Returns the label carrying external key `key`.
    #[must_use]
    pub fn label_for(&self, key: &K) -> Option<L> {
        self.by_key.get(key).copied()
    }

    /// Finds the first caller record whose key matches `label`'s.
    ///
    /// Scans `data` front to back.
    pub fn find_external<'d, E>(
        &self,
        data: &'d [E],
        label: L,
        key: impl Fn(&E) -> &K,
    ) -> Option<&'d E> {
        let wanted = self.key_of(label)?;
        data.iter().find(|record| key(record) == wanted)
    }
}

/// A hash index over caller-owned records keyed the same way as
/// [`ExternalKeys`].
#[derive(Debug)]
pub struct ExternalIndex<'d, K, E> {
    by_key: HashMap<K, usize>,
    data: &'d [E],
}

impl<'d, K: Eq + Hash + Debug, E> ExternalIndex<'d, K, E> {
    /// Indexes `data` by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share a key.
    pub fn build(name: &str, data: &'d [E], key: impl Fn(&E) -> K) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(data.len());
        for (position, record) in data.iter().enumerate() {
            if let Some(previous) = by_key.insert(key(record), position) {
                return Err(Error::label_mismatch(
                    name,
                    format!("records {previous} and {position} share a key"),
                ));
            }
        }
        debug!(data = name, records = data.len(), "label.external_index");
        Ok(Self {
            by_key,
            data,
        })
    }

    /// Returns the record with key `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&'d E> {
        self.by_key.get(key).map(|&position| &self.data[position])
    }

    /// Returns the record correlated with `label`.
    #[must_use]
    pub fn for_label<L: Label>(&self, keys: &ExternalKeys<L, K>, label: L) -> Option<&'d E>
    where
        K: Clone,
    {
        self.get(keys.key_of(label)?)
    }

    /// Returns the number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if no record is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
