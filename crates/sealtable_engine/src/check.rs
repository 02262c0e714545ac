//! Construction-time validation gate.

use sealtable_foundation::{Result, Validation};
use tracing::warn;

/// Runs `check` according to `validation`.
///
/// Strict validation reports failures as errors. Trusted validation only
/// runs in debug builds, where a failure is a fatal diagnostic: the data was
/// promised to be valid.
pub(crate) fn run(
    validation: Validation,
    what: &str,
    check: impl FnOnce() -> Result<()>,
) -> Result<()> {
    if !validation.enabled() {
        return Ok(());
    }
    match check() {
        Ok(()) => Ok(()),
        Err(err) if validation.is_strict() => {
            warn!(check = what, error = %err, "validation.failed");
            Err(err)
        }
        Err(err) => panic!("trusted data failed {what} validation: {err}"),
    }
}
