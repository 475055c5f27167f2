//! Merging parsed sources into one unique, ordered host set.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::{ExclusionTable, Source};
use crate::entry::parse_entry;

/// Unique hostnames in lexicographic byte order.
///
/// Never holds the empty string. Sets produced by [`aggregate`] also never
/// hold a member of the [`ExclusionTable`] they were built with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostnameSet {
    hosts: BTreeSet<String>,
}

impl HostnameSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a host. Returns `false` if it was empty or already present.
    pub fn insert(&mut self, host: impl Into<String>) -> bool {
        let host = host.into();
        if host.is_empty() {
            return false;
        }
        self.hosts.insert(host)
    }

    /// Returns `true` if `host` is in the set.
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// Number of hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns `true` if the set holds no hosts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Iterates hosts in render order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HostnameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for host in iter {
            set.insert(host);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for HostnameSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for host in iter {
            self.insert(host);
        }
    }
}

/// A source line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// Name of the source the line came from.
    pub source: String,
    /// 1-based line number within the source.
    pub line_number: usize,
    /// The raw line.
    pub line: String,
}

impl fmt::Display for RejectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: error parsing entry '{}'",
            self.source, self.line_number, self.line
        )
    }
}

/// Outcome of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Hosts to block.
    pub hosts: HostnameSet,
    /// Lines skipped because they had no host field.
    pub rejected: Vec<RejectedLine>,
}

/// Parses every line of every source and merges the hosts.
///
/// Excluded names are dropped and duplicates collapse. Unparseable lines are
/// logged and returned in [`Aggregation::rejected`]; they never abort the
/// merge. The result does not depend on the order of `sources`.
///
/// # Example
///
/// ```
/// use hosts_manager::{ExclusionTable, Source, aggregate};
///
/// let sources = [
///     Source::new("a", "0.0.0.0 ads.example\n127.0.0.1 localhost\n"),
///     Source::new("b", "0.0.0.0 ads.example\n0.0.0.0 trk.example\n"),
/// ];
/// let result = aggregate(&sources, &ExclusionTable::default());
/// assert_eq!(result.hosts.iter().collect::<Vec<_>>(), ["ads.example", "trk.example"]);
/// ```
#[must_use]
pub fn aggregate(sources: &[Source], exclusions: &ExclusionTable) -> Aggregation {
    let mut result = Aggregation::default();

    for source in sources {
        let mut parsed = 0usize;
        for (idx, line) in source.raw_text.lines().enumerate() {
            match parse_entry(line) {
                Ok(Some(host)) => {
                    parsed += 1;
                    if !exclusions.contains(&host) {
                        result.hosts.insert(host);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        source = %source.name,
                        line_number = idx + 1,
                        error = %e,
                        "Skipping unparseable hosts entry"
                    );
                    result.rejected.push(RejectedLine {
                        source: source.name.clone(),
                        line_number: idx + 1,
                        line: e.line,
                    });
                }
            }
        }
        tracing::debug!(source = %source.name, entries = parsed, "Processed hosts source");
    }

    tracing::debug!(
        hosts = result.hosts.len(),
        rejected = result.rejected.len(),
        "Aggregated hosts sources"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(result: &Aggregation) -> Vec<&str> {
        result.hosts.iter().collect()
    }

    #[test]
    fn merges_and_dedupes_across_sources() {
        let sources = [
            Source::new("one", "0.0.0.0 b.example\n0.0.0.0 a.example\n"),
            Source::new("two", "0.0.0.0 a.example\n::0 c.example\n0.0.0.0 b.example\n"),
        ];
        let result = aggregate(&sources, &ExclusionTable::default());
        assert_eq!(hosts(&result), ["a.example", "b.example", "c.example"]);
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn drops_excluded_names() {
        let text = "\
127.0.0.1 localhost
127.0.0.1 localhost.localdomain
255.255.255.255 broadcasthost
ff02::1 ip6-allnodes
0.0.0.0 0.0.0.0
0.0.0.0 ads.example.com
";
        let result = aggregate(&[Source::new("sb", text)], &ExclusionTable::default());
        assert_eq!(hosts(&result), ["ads.example.com"]);
    }

    #[test]
    fn reports_rejected_lines_and_continues() {
        let text = "0.0.0.0 a.example\nincomplete\n\n0.0.0.0 b.example\n";
        let result = aggregate(&[Source::new("list", text)], &ExclusionTable::default());
        assert_eq!(hosts(&result), ["a.example", "b.example"]);
        assert_eq!(
            result.rejected,
            vec![RejectedLine {
                source: "list".into(),
                line_number: 2,
                line: "incomplete".into(),
            }]
        );
        assert_eq!(
            result.rejected[0].to_string(),
            "list:2: error parsing entry 'incomplete'"
        );
    }

    #[test]
    fn empty_result_is_valid() {
        let result = aggregate(
            &[Source::new("empty", "# nothing here\n127.0.0.1 localhost\n")],
            &ExclusionTable::default(),
        );
        assert!(result.hosts.is_empty());
        assert!(aggregate(&[], &ExclusionTable::default()).hosts.is_empty());
    }

    #[test]
    fn source_order_does_not_matter() {
        let a = Source::new("a", "0.0.0.0 x.example\n0.0.0.0 y.example\n");
        let b = Source::new("b", "0.0.0.0 z.example\n0.0.0.0 x.example\n");
        let table = ExclusionTable::default();
        assert_eq!(
            aggregate(&[a.clone(), b.clone()], &table).hosts,
            aggregate(&[b, a], &table).hosts
        );
    }

    #[test]
    fn set_ignores_empty_hosts() {
        let mut set: HostnameSet = ["a", "", "a"].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(!set.insert(""));
        set.extend(["b"]);
        assert!(set.contains("b"));
    }
}
