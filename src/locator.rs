//! Finding and stripping the managed section of existing file content.

use crate::aggregate::HostnameSet;
use crate::config::{END_MARKER, START_MARKER};
use crate::entry::parse_entry;
use crate::error::{HostsError, Result};

/// Existing file content split around its managed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Everything outside the managed section.
    pub preamble: String,
    /// Lines strictly between the markers, if a section was found.
    pub block: Option<String>,
}

impl FileContent {
    /// Returns `true` if a managed section was stripped.
    #[must_use]
    pub const fn had_block(&self) -> bool {
        self.block.is_some()
    }

    /// Hosts listed in the stripped managed section.
    ///
    /// Empty when there was no section.
    #[must_use]
    pub fn managed_hosts(&self) -> HostnameSet {
        self.block
            .as_deref()
            .unwrap_or_default()
            .lines()
            .filter_map(|line| parse_entry(line).ok().flatten())
            .collect()
    }
}

/// Splits `text` into its preamble and managed section.
///
/// A blank line directly above the start marker is dropped, since
/// [`render`](crate::render::render) always inserts one on older files.
/// Content after the end marker is kept and joined onto the preamble.
///
/// # Errors
///
/// Returns [`HostsError::MalformedBlock`] when the start marker is present
/// but no end marker follows it.
///
/// # Example
///
/// ```
/// use hosts_manager::config::{END_MARKER, START_MARKER};
/// use hosts_manager::locator::locate;
///
/// let text = format!("127.0.0.1 localhost\n{START_MARKER}0.0.0.0 ads.example\n{END_MARKER}");
/// let content = locate(&text)?;
/// assert_eq!(content.preamble, "127.0.0.1 localhost\n");
/// assert!(content.managed_hosts().contains("ads.example"));
/// # Ok::<(), hosts_manager::HostsError>(())
/// ```
pub fn locate(text: &str) -> Result<FileContent> {
    if !text.contains(START_MARKER) {
        return Ok(FileContent {
            preamble: text.to_string(),
            block: None,
        });
    }

    let normalized = text.replacen(
        &format!("\n\n{START_MARKER}"),
        &format!("\n{START_MARKER}"),
        1,
    );

    let start = normalized
        .find(START_MARKER)
        .ok_or_else(|| HostsError::malformed("could not find start of managed block"))?;
    let body_start = start + START_MARKER.len();
    let end = normalized
        .rfind(END_MARKER)
        .filter(|&end| end >= body_start)
        .ok_or_else(|| HostsError::malformed("could not find end of managed block"))?;

    let mut preamble = String::with_capacity(normalized.len() - (end - start));
    preamble.push_str(&normalized[..start]);
    preamble.push_str(&normalized[end + END_MARKER.len()..]);

    Ok(FileContent {
        preamble,
        block: Some(normalized[body_start..end].to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn managed(body: &str) -> String {
        format!("{START_MARKER}{body}{END_MARKER}")
    }

    #[test]
    fn no_marker_returns_text_unchanged() {
        let text = "127.0.0.1 localhost\n\n# my entries\n";
        let content = locate(text).unwrap();
        assert_eq!(content.preamble, text);
        assert!(!content.had_block());
        assert!(content.managed_hosts().is_empty());
    }

    #[test]
    fn strips_block_at_end() {
        let text = format!("user content\n{}", managed("0.0.0.0 a.example\n::0 a.example\n"));
        let content = locate(&text).unwrap();
        assert_eq!(content.preamble, "user content\n");
        assert_eq!(
            content.block.as_deref(),
            Some("0.0.0.0 a.example\n::0 a.example\n")
        );
    }

    #[test]
    fn collapses_blank_line_before_start_marker() {
        let text = format!("user content\n\n{}", managed("0.0.0.0 a.example\n"));
        assert_eq!(locate(&text).unwrap().preamble, "user content\n");
    }

    #[test]
    fn only_one_blank_line_is_collapsed() {
        let text = format!("user content\n\n\n{}", managed(""));
        assert_eq!(locate(&text).unwrap().preamble, "user content\n\n");
    }

    #[test]
    fn keeps_content_after_block() {
        let text = format!("before\n{}after\n", managed("0.0.0.0 a.example\n"));
        assert_eq!(locate(&text).unwrap().preamble, "before\nafter\n");
    }

    #[test]
    fn uses_last_end_marker() {
        let text = format!(
            "before\n{START_MARKER}0.0.0.0 a.example\n{END_MARKER}0.0.0.0 b.example\n{END_MARKER}tail\n"
        );
        let content = locate(&text).unwrap();
        assert_eq!(content.preamble, "before\ntail\n");
        assert!(content.managed_hosts().contains("b.example"));
    }

    #[test]
    fn empty_block() {
        let content = locate(&managed("")).unwrap();
        assert_eq!(content.preamble, "");
        assert_eq!(content.block.as_deref(), Some(""));
        assert!(content.had_block());
    }

    #[test]
    fn missing_end_marker_is_malformed() {
        let text = format!("user content\n{START_MARKER}0.0.0.0 a.example\n");
        let err = locate(&text).unwrap_err();
        assert!(matches!(err, HostsError::MalformedBlock { .. }));
    }

    #[test]
    fn end_marker_before_start_is_malformed() {
        let text = format!("{END_MARKER}user content\n{START_MARKER}0.0.0.0 a.example\n");
        assert!(matches!(
            locate(&text),
            Err(HostsError::MalformedBlock { .. })
        ));
    }

    #[test]
    fn marker_without_newline_is_not_a_marker() {
        let text = "# DO NOT MODIFY MANUALLY. Managed hosts start.";
        let content = locate(text).unwrap();
        assert!(!content.had_block());
        assert_eq!(content.preamble, text);
    }

    #[test]
    fn managed_hosts_reads_both_families() {
        let text = managed("0.0.0.0 b.example\n::0 b.example\n0.0.0.0 a.example\n::0 a.example\n");
        let hosts = locate(&text).unwrap().managed_hosts();
        assert_eq!(hosts.iter().collect::<Vec<_>>(), ["a.example", "b.example"]);
    }
}
