//! Hosts-format line parser.
//!
//! A line is `<address> <host>` with an optional `#` comment. The address
//! is discarded; everything after the first whitespace run is the host.

use crate::error::EntryError;

/// Extracts the host from one raw line.
///
/// Returns `Ok(None)` for blank and comment-only lines. A line with content
/// but no second field is an [`EntryError`].
///
/// Trailing fields are not split: `0.0.0.0 a.example b.example` yields the
/// single host `"a.example b.example"`.
///
/// # Errors
///
/// Returns [`EntryError`] when the line has an address but no host.
///
/// # Example
///
/// ```
/// use hosts_manager::entry::parse_entry;
///
/// assert_eq!(parse_entry("0.0.0.0 ads.example # tracker"), Ok(Some("ads.example".into())));
/// assert_eq!(parse_entry("   # just a comment"), Ok(None));
/// assert!(parse_entry("0.0.0.0").is_err());
/// ```
pub fn parse_entry(line: &str) -> Result<Option<String>, EntryError> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let host = content
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest.trim());
    if host.is_empty() {
        return Err(EntryError {
            line: line.to_string(),
        });
    }

    Ok(Some(host.to_string()))
}
