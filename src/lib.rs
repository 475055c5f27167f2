//! # hosts-manager
//!
//! Merge hosts-format blocklists into a managed section of `/etc/hosts`.
//!
//! Blocked hosts are written between two fixed marker lines and pointed at
//! the `0.0.0.0` and `::0` addresses. Everything outside the markers is
//! user content and is preserved on every run. Re-running with the same
//! lists produces the same file byte for byte.
//!
//! ## Quick start
//!
//! ```
//! use hosts_manager::config::{END_MARKER, START_MARKER};
//! use hosts_manager::{ExclusionTable, Source, aggregate, merge};
//!
//! let sources = [Source::new(
//!     "example",
//!     "0.0.0.0 ads.example.com\n0.0.0.0 trk.example.com # tracker\n",
//! )];
//! let result = aggregate(&sources, &ExclusionTable::default());
//!
//! let text = merge("user content\n", &result.hosts)?;
//! assert_eq!(
//!     text,
//!     format!(
//!         "user content\n{START_MARKER}\
//!          0.0.0.0 ads.example.com\n::0 ads.example.com\n\
//!          0.0.0.0 trk.example.com\n::0 trk.example.com\n{END_MARKER}"
//!     ),
//! );
//!
//! // Running again over its own output changes nothing.
//! assert_eq!(merge(&text, &result.hosts)?, text);
//! # Ok::<(), hosts_manager::HostsError>(())
//! ```
//!
//! ## Writing to disk
//!
//! [`HostsFile`] validates the existing file, copies it to `<path>.bak`, and
//! commits the new content with a single rename:
//!
//! ```rust,ignore
//! let file = HostsFile::new();
//! let report = file.apply(&result.hosts)?;
//! ```
//!
//! ## Permissions
//!
//! Writing `/etc/hosts` requires root. The library does not elevate; the
//! `hosts-manager` binary refuses to run unprivileged.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod config;
pub mod entry;
pub mod error;
pub mod fetch;
pub mod hosts_file;
pub mod locator;
pub mod prompt;
pub mod render;
pub mod util;

pub use aggregate::{Aggregation, HostnameSet, RejectedLine, aggregate};
pub use config::{CATALOG, CatalogSource, ExclusionTable, Source};
pub use error::{EntryError, HostsError, Result};
pub use fetch::Fetcher;
pub use hosts_file::{ApplyReport, HostsFile};
pub use locator::{FileContent, locate};
pub use render::{merge, render};
