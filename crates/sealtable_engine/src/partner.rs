//! One-to-one relationships as a pair of mutual references.
//!
//! A 1-1 link between `A` and `B` is stored twice: `A` references its
//! partner in `B`, and `B` references its partner in `A`. [`Partner`]
//! checks at construction that the two sides agree, so that following the
//! link twice always comes back to the starting row.

use std::fmt;

use sealtable_foundation::{BuildConfig, Error, ErrorContext, ErrorKind, Ref, Result, TableId};
use sealtable_storage::Table;
use tracing::debug;

use crate::check;
use crate::relationship::Relationship;

/// A validated one-to-one relationship between `A` and `B`.
///
/// Self-partnered tables (a `spouse` column, say) use the same table for
/// both sides.
pub struct Partner<A, B> {
    forward: Relationship<A, B>,
    backward: Relationship<B, A>,
}

impl<A: 'static, B: 'static> Partner<A, B> {
    /// Pairs two mutual reference columns with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a row's partner does not reference it back.
    pub fn build(
        forward: Relationship<A, B>,
        backward: Relationship<B, A>,
        a: &Table<A>,
        b: &Table<B>,
    ) -> Result<Self> {
        Self::build_with(BuildConfig::default(), forward, backward, a, b)
    }

    /// Pairs two mutual reference columns.
    ///
    /// # Errors
    ///
    /// Returns an error if either side was built over tables other than `a`
    /// and `b`, or if a row's partner does not reference it back.
    pub fn build_with(
        config: BuildConfig,
        forward: Relationship<A, B>,
        backward: Relationship<B, A>,
        a: &Table<A>,
        b: &Table<B>,
    ) -> Result<Self> {
        same_tables(
            forward.name(),
            (forward.source_id(), forward.target_id()),
            (a.id(), b.id()),
        )?;
        same_tables(
            backward.name(),
            (backward.source_id(), backward.target_id()),
            (b.id(), a.id()),
        )?;
        let name = forward.name().to_string();
        check::run(config.validation, "partner", || {
            symmetric(&forward, &backward, a, b)
                .and_then(|()| symmetric(&backward, &forward, b, a))
                .map_err(|err| {
                    err.with_context(
                        ErrorContext::new()
                            .with_table(a.name())
                            .with_column(name.as_str())
                            .with_frame("partner.build"),
                    )
                })
        })?;
        debug!(forward = %forward.name(), backward = %backward.name(), "partner.build");
        Ok(Self { forward, backward })
    }

    /// Returns the `A` to `B` side.
    #[must_use]
    pub fn forward(&self) -> &Relationship<A, B> {
        &self.forward
    }

    /// Returns the `B` to `A` side.
    #[must_use]
    pub fn backward(&self) -> &Relationship<B, A> {
        &self.backward
    }

    /// Returns the partner of an `A` record, if it has one.
    #[must_use]
    pub fn partner_of_a<'a>(&self, b: &'a Table<B>, record: &A) -> Option<&'a B> {
        self.forward.resolve(b, record)
    }

    /// Returns the partner of a `B` record, if it has one.
    #[must_use]
    pub fn partner_of_b<'a>(&self, a: &'a Table<A>, record: &B) -> Option<&'a A> {
        self.backward.resolve(a, record)
    }
}

impl<A, B> fmt::Debug for Partner<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partner")
            .field("forward", &self.forward)
            .field("backward", &self.backward)
            .finish()
    }
}

fn same_tables(name: &str, built: (TableId, TableId), given: (TableId, TableId)) -> Result<()> {
    if built == given {
        return Ok(());
    }
    Err(Error::new(ErrorKind::Internal(format!(
        "partner side {name} links {} to {}, expected {} to {}",
        built.0, built.1, given.0, given.1
    ))))
}

/// Checks that every `from` row's partner points back at it.
fn symmetric<X: 'static, Y: 'static>(
    there: &Relationship<X, Y>,
    back: &Relationship<Y, X>,
    from: &Table<X>,
    to: &Table<Y>,
) -> Result<()> {
    for (row, record) in from.rows() {
        let Some(partner) = there.field(record) else {
            continue;
        };
        if back.field(to.resolve(partner)) != Some(Ref::new(row)) {
            return Err(Error::asymmetric_partner(there.name(), row));
        }
    }
    Ok(())
}
