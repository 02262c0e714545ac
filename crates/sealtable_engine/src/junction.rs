//! Many-to-many relationships through a junction table.
//!
//! Each junction record holds one reference into `A` and one into `B`. The
//! `B` rows related to an `A` row are found by walking the junction rows
//! that reference it (a 1-N step) and following each one's `B` reference
//! (an N-1 step). Results keep the junction table's stored order.

use std::fmt;

use sealtable_foundation::{Error, ErrorKind, Ref, Result};
use sealtable_storage::{Rows, Table};
use tracing::debug;

use crate::relationship::Relationship;

/// A many-to-many relationship between `A` and `B` stored in `J`.
pub struct Junction<A, B, J> {
    left: Relationship<J, A>,
    right: Relationship<J, B>,
}

impl<A: 'static, B: 'static, J: 'static> Junction<A, B, J> {
    /// Chains two reference columns of the same junction table.
    ///
    /// # Errors
    ///
    /// Returns an error if the two relationships are not built over the
    /// same junction table.
    pub fn new(left: Relationship<J, A>, right: Relationship<J, B>) -> Result<Self> {
        if left.source_id() != right.source_id() {
            return Err(Error::new(ErrorKind::Internal(format!(
                "junction sides {} and {} use different tables",
                left.name(),
                right.name()
            ))));
        }
        debug!(left = %left.name(), right = %right.name(), "junction.build");
        Ok(Self { left, right })
    }

    /// Returns the junction-to-`A` side.
    #[must_use]
    pub fn left(&self) -> &Relationship<J, A> {
        &self.left
    }

    /// Returns the junction-to-`B` side.
    #[must_use]
    pub fn right(&self) -> &Relationship<J, B> {
        &self.right
    }

    /// Returns the junction rows that reference `a`, in junction order.
    pub fn links<'a>(&'a self, junction: &'a Table<J>, a: Ref<A>) -> Rows<'a, J> {
        self.left.reverse(junction, a)
    }

    /// Returns the junction rows that reference `b`, in junction order.
    pub fn links_rev<'a>(&'a self, junction: &'a Table<J>, b: Ref<B>) -> Rows<'a, J> {
        self.right.reverse(junction, b)
    }

    /// Returns the `B` rows related to `a`, in junction order.
    pub fn related<'a>(
        &'a self,
        junction: &'a Table<J>,
        b_table: &'a Table<B>,
        a: Ref<A>,
    ) -> impl Iterator<Item = &'a B> + 'a {
        self.links(junction, a)
            .filter_map(move |link| self.right.resolve(b_table, link))
    }

    /// Returns the `A` rows related to `b`, in junction order.
    pub fn related_rev<'a>(
        &'a self,
        junction: &'a Table<J>,
        a_table: &'a Table<A>,
        b: Ref<B>,
    ) -> impl Iterator<Item = &'a A> + 'a {
        self.links_rev(junction, b)
            .filter_map(move |link| self.left.resolve(a_table, link))
    }

    /// Returns the `B` references related to `a`, in junction order.
    pub fn related_refs<'a>(
        &'a self,
        junction: &'a Table<J>,
        a: Ref<A>,
    ) -> impl Iterator<Item = Ref<B>> + 'a {
        self.links(junction, a)
            .filter_map(move |link| self.right.field(link))
    }

    /// Returns the `A` references related to `b`, in junction order.
    pub fn related_rev_refs<'a>(
        &'a self,
        junction: &'a Table<J>,
        b: Ref<B>,
    ) -> impl Iterator<Item = Ref<A>> + 'a {
        self.links_rev(junction, b)
            .filter_map(move |link| self.left.field(link))
    }
}

impl<A, B, J> fmt::Debug for Junction<A, B, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Junction")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
