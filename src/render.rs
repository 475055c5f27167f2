//! Rendering the managed section and merging it into existing content.

use std::fmt::Write as _;

use crate::aggregate::HostnameSet;
use crate::config::{END_MARKER, IPV4_ANY, IPV6_ANY, START_MARKER};
use crate::error::Result;
use crate::locator::locate;

/// Appends a freshly built managed section to `preamble`.
///
/// A non-empty preamble is trimmed to end in exactly one newline; an empty
/// one stays empty. Each host gets one IPv4 and one IPv6 line, in set order.
///
/// ```text
/// <preamble>
/// # DO NOT MODIFY MANUALLY. Managed hosts start.
/// 0.0.0.0 ads.example.com
/// ::0 ads.example.com
/// # DO NOT MODIFY MANUALLY. Managed hosts end.
/// ```
#[must_use]
pub fn render(preamble: &str, hosts: &HostnameSet) -> String {
    let body_len: usize = hosts
        .iter()
        .map(|h| 2 * h.len() + IPV4_ANY.len() + IPV6_ANY.len() + 4)
        .sum();
    let mut out =
        String::with_capacity(preamble.len() + START_MARKER.len() + body_len + END_MARKER.len() + 1);

    let trimmed = preamble.trim_end_matches('\n');
    if !trimmed.is_empty() {
        out.push_str(trimmed);
        out.push('\n');
    }

    out.push_str(START_MARKER);
    for host in hosts.iter() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{IPV4_ANY} {host}");
        let _ = writeln!(out, "{IPV6_ANY} {host}");
    }
    out.push_str(END_MARKER);
    out
}

/// Replaces the managed section of `existing` with one built from `hosts`.
///
/// Running this on its own output with the same hosts returns the input
/// byte for byte.
///
/// # Errors
///
/// Returns [`HostsError::MalformedBlock`](crate::HostsError::MalformedBlock)
/// when `existing` has a start marker without an end marker.
///
/// # Example
///
/// ```
/// use hosts_manager::{HostnameSet, merge};
///
/// let hosts: HostnameSet = ["ads.example"].into_iter().collect();
/// let once = merge("127.0.0.1 localhost\n", &hosts)?;
/// assert_eq!(merge(&once, &hosts)?, once);
/// # Ok::<(), hosts_manager::HostsError>(())
/// ```
pub fn merge(existing: &str, hosts: &HostnameSet) -> Result<String> {
    let content = locate(existing)?;
    Ok(render(&content.preamble, hosts))
}
