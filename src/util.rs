//! Internal utilities.

/// Checks whether the process runs with an effective UID of 0.
#[cfg(unix)]
#[must_use]
pub fn is_privileged() -> bool {
    // SAFETY: `geteuid` has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Privilege checks are Unix only; elsewhere the write itself reports
/// `PermissionDenied`.
#[cfg(not(unix))]
#[must_use]
pub const fn is_privileged() -> bool {
    true
}
