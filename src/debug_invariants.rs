//! Structural self-checks for the crate's containers.
//!
//! [`DebugInvariants::validate_invariants`] is always compiled and reports the
//! first broken invariant as a [`MeshError`]. The assertion form panics on a
//! violation but only runs in debug builds or with the `strict-invariants` or
//! `check-invariants` feature enabled; release builds skip it entirely.

use crate::mesh_error::MeshError;

/// Whether [`DebugInvariants::debug_assert_invariants`] does anything in this build.
pub const INVARIANTS_ENABLED: bool = cfg!(any(
    debug_assertions,
    feature = "strict-invariants",
    feature = "check-invariants"
));

/// Containers that can audit their own cross-references.
pub trait DebugInvariants {
    /// Container name used in assertion messages.
    const LABEL: &'static str;

    /// Walk the container and return the first inconsistency found.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panic on a broken invariant when checking is enabled.
    #[inline]
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), Self::LABEL);
    }
}

/// Panic with `[invariants] <context>: <error>` if `$check` is an `Err`, but
/// only when [`INVARIANTS_ENABLED`] holds. `$check` is not evaluated otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $ctx:expr) => {
        if $crate::debug_invariants::INVARIANTS_ENABLED
            && let Err(e) = $check
        {
            panic!("[invariants] {}: {}", $ctx, e);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl DebugInvariants for Broken {
        const LABEL: &'static str = "Broken";

        fn validate_invariants(&self) -> Result<(), MeshError> {
            Err(MeshError::InvariantViolation {
                container: Self::LABEL,
                detail: "always".into(),
            })
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "[invariants] Broken")]
    fn assertion_panics_in_debug_builds() {
        Broken.debug_assert_invariants();
    }

    #[test]
    fn validation_is_always_available() {
        assert!(matches!(
            Broken.validate_invariants(),
            Err(MeshError::InvariantViolation { container: "Broken", .. })
        ));
    }
}
