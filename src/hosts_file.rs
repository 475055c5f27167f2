//! Reading and rewriting the hosts file on disk.
//!
//! Every write first copies the current file to `<path>.bak`, then commits
//! the new content through a temporary file in the same directory and a
//! single rename, so the target path always holds a complete file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::aggregate::HostnameSet;
use crate::config::DEFAULT_HOSTS_PATH;
use crate::error::Result;
use crate::locator::{FileContent, locate};
use crate::render::render;

/// Suffix appended to the hosts file path for the backup copy.
const BACKUP_SUFFIX: &str = ".bak";

/// Manages the block section of a hosts file.
///
/// # Lifecycle
///
/// 1. [`apply`](Self::apply) replaces (or adds) the managed section.
/// 2. The resolver picks the change up on its next lookup.
/// 3. [`remove`](Self::remove) strips the managed section again.
///
/// Content outside the managed section is preserved on every write.
///
/// # Permissions
///
/// `/etc/hosts` requires root. The caller must handle elevation.
///
/// # Example
///
/// ```rust,ignore
/// use hosts_manager::{HostsFile, HostnameSet};
///
/// let hosts: HostnameSet = ["ads.example.com"].into_iter().collect();
/// let file = HostsFile::new();
/// file.apply(&hosts)?;
/// // ...
/// file.remove()?;
/// ```
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
}

/// Summary of a completed [`HostsFile::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Number of hosts in the new managed section.
    pub hosts: usize,
    /// Number of hosts in the section that was replaced.
    pub previous_hosts: usize,
    /// Where the previous file was copied to.
    pub backup: PathBuf,
}

impl HostsFile {
    /// Targets the platform's default hosts file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HOSTS_PATH),
        }
    }

    /// Targets a custom path (useful for testing).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the hosts file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path the backup copy is written to.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Reads the file and splits off its managed section.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`](crate::HostsError::Io) if the file cannot
    /// be read, or [`HostsError::MalformedBlock`](crate::HostsError::MalformedBlock)
    /// if its managed section is broken.
    pub fn inspect(&self) -> Result<FileContent> {
        let text = std::fs::read_to_string(&self.path)?;
        locate(&text)
    }

    /// Returns `true` if the file exists and carries a managed section.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.inspect().is_ok_and(|c| c.had_block())
    }

    /// Hosts currently in the managed section.
    ///
    /// # Errors
    ///
    /// Same as [`inspect`](Self::inspect).
    pub fn managed_hosts(&self) -> Result<HostnameSet> {
        Ok(self.inspect()?.managed_hosts())
    }

    /// Returns the text [`apply`](Self::apply) would write, without writing.
    ///
    /// # Errors
    ///
    /// Same as [`inspect`](Self::inspect).
    pub fn plan(&self, hosts: &HostnameSet) -> Result<String> {
        let content = self.inspect()?;
        Ok(render(&content.preamble, hosts))
    }

    /// Replaces the managed section with `hosts`.
    ///
    /// The existing file is validated before anything is written; a malformed
    /// file is left untouched and no backup is made.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::MalformedBlock`](crate::HostsError::MalformedBlock)
    /// for a broken managed section, or
    /// [`HostsError::Io`](crate::HostsError::Io) if reading, backing up, or
    /// writing fails.
    pub fn apply(&self, hosts: &HostnameSet) -> Result<ApplyReport> {
        let content = self.inspect()?;
        let previous_hosts = content.managed_hosts().len();
        let backup = self.commit(&render(&content.preamble, hosts))?;

        tracing::info!(
            path = %self.path.display(),
            hosts = hosts.len(),
            previous_hosts,
            "Wrote managed hosts section"
        );
        Ok(ApplyReport {
            hosts: hosts.len(),
            previous_hosts,
            backup,
        })
    }

    /// Strips the managed section, keeping everything else.
    ///
    /// Returns `false` without writing if there was no managed section.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn remove(&self) -> Result<bool> {
        let content = self.inspect()?;
        if !content.had_block() {
            tracing::debug!(path = %self.path.display(), "No managed section, skipping");
            return Ok(false);
        }

        self.commit(&content.preamble)?;
        tracing::info!(path = %self.path.display(), "Removed managed hosts section");
        Ok(true)
    }

    /// Backs up the current file, then atomically replaces it with `text`.
    fn commit(&self, text: &str) -> Result<PathBuf> {
        let backup = self.backup_path();
        std::fs::copy(&self.path, &backup)?;
        tracing::debug!(backup = %backup.display(), "Backed up hosts file");

        let permissions = std::fs::metadata(&self.path)?.permissions();
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.as_file().set_permissions(permissions)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(backup)
    }
}

impl Default for HostsFile {
    fn default() -> Self {
        Self::new()
    }
}
