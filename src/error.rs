//! Error types.

use thiserror::Error;

/// Result alias for hosts-file operations.
pub type Result<T> = std::result::Result<T, HostsError>;

/// Errors returned by hosts-file operations.
#[derive(Debug, Error)]
pub enum HostsError {
    /// Filesystem I/O failed (typically `PermissionDenied` on `/etc/hosts`).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file carries a start marker without a matching end marker.
    #[error("malformed hosts file: {reason}")]
    MalformedBlock {
        /// What is wrong with the managed section.
        reason: String,
    },

    /// No blocklist source was chosen.
    #[error("no hosts source selected")]
    NoSourcesSelected,

    /// A source id does not match any catalog entry.
    #[error("unknown hosts source: {id}")]
    UnknownSource {
        /// The id that was asked for.
        id: String,
    },

    /// The process lacks the privileges to rewrite the hosts file.
    #[error("this operation needs root permissions")]
    NotPrivileged,

    /// The server answered with a non-success status.
    #[error("HTTP request failed for {url}: status {status}")]
    HttpStatus {
        /// URL that was requested.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// Network error while downloading a source.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl HostsError {
    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBlock {
            reason: reason.into(),
        }
    }
}

/// A source line that has content but no host field.
///
/// Recoverable: the line is skipped and reported, the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error parsing entry '{line}'")]
pub struct EntryError {
    /// The raw line as it appeared in the source.
    pub line: String,
}
