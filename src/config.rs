//! Static configuration: markers, addresses, exclusions and the source catalog.

use std::collections::HashSet;

use crate::error::{HostsError, Result};

/// First line of the managed section.
pub const START_MARKER: &str = "# DO NOT MODIFY MANUALLY. Managed hosts start.\n";

/// Last line of the managed section.
pub const END_MARKER: &str = "# DO NOT MODIFY MANUALLY. Managed hosts end.\n";

/// IPv4 address every blocked host is pointed at.
pub const IPV4_ANY: &str = "0.0.0.0";

/// IPv6 address every blocked host is pointed at.
pub const IPV6_ANY: &str = "::0";

/// Default hosts file location.
#[cfg(not(windows))]
pub const DEFAULT_HOSTS_PATH: &str = "/etc/hosts";

/// Default hosts file location.
#[cfg(windows)]
pub const DEFAULT_HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

/// Names the StevenBlack lists prepend to every file, plus the "any"
/// addresses themselves so that re-reading our own output is harmless.
const DEFAULT_EXCLUSIONS: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
    "ip6-localnet",
    "ip6-mcastprefix",
    "ip6-allnodes",
    "ip6-allrouters",
    "ip6-allhosts",
    "0.0.0.0",
    "::",
    "::0",
];

/// Hostnames that must never appear in the managed section.
///
/// Matching is exact: `LOCALHOST` is not excluded by `localhost`.
///
/// # Example
///
/// ```
/// use hosts_manager::ExclusionTable;
///
/// let table = ExclusionTable::default();
/// assert!(table.contains("broadcasthost"));
/// assert!(table.contains("::0"));
/// assert!(!table.contains("ads.example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct ExclusionTable {
    names: HashSet<String>,
}

impl ExclusionTable {
    /// Creates a table from an explicit list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `host` must be dropped.
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.names.contains(host)
    }

    /// Number of excluded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionTable {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

/// Raw blocklist text handed to the merge engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Display name, used in diagnostics.
    pub name: String,
    /// The downloaded list, unparsed.
    pub raw_text: String,
}

impl Source {
    /// Creates a source from its name and text.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// A downloadable blocklist offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSource {
    /// Short identifier accepted on the command line.
    pub id: &'static str,
    /// Human readable title.
    pub name: &'static str,
    /// Where the list is downloaded from.
    pub url: &'static str,
}

/// Built-in blocklists, in prompt order.
pub const CATALOG: &[CatalogSource] = &[
    CatalogSource {
        id: "unified",
        name: "Unified (adware + malware)",
        url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts",
    },
    CatalogSource {
        id: "fakenews",
        name: "Fake News",
        url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/fakenews-only/hosts",
    },
    CatalogSource {
        id: "gambling",
        name: "Gambling",
        url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/gambling-only/hosts",
    },
    CatalogSource {
        id: "porn",
        name: "Pornography",
        url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/porn-only/hosts",
    },
    CatalogSource {
        id: "social",
        name: "Social Media",
        url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/social-only/hosts",
    },
];

/// Looks up a catalog entry by id, ignoring ASCII case.
#[must_use]
pub fn find_source(id: &str) -> Option<&'static CatalogSource> {
    CATALOG.iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

/// Resolves command-line ids to catalog entries, keeping catalog order.
///
/// # Errors
///
/// Returns [`HostsError::UnknownSource`] for an id not in [`CATALOG`], and
/// [`HostsError::NoSourcesSelected`] when `ids` is empty.
pub fn select_by_id<S: AsRef<str>>(ids: &[S]) -> Result<Vec<&'static CatalogSource>> {
    if ids.is_empty() {
        return Err(HostsError::NoSourcesSelected);
    }
    for id in ids {
        if find_source(id.as_ref()).is_none() {
            return Err(HostsError::UnknownSource {
                id: id.as_ref().to_string(),
            });
        }
    }
    Ok(CATALOG
        .iter()
        .filter(|s| ids.iter().any(|id| s.id.eq_ignore_ascii_case(id.as_ref())))
        .collect())
}
