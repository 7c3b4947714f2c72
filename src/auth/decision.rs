//! Fields returned by the authorization backend.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

/// Data the backend attaches to an approved request.
///
/// Starts out empty for every request and is filled in by an
/// authorization strategy before any capability handler runs. A field is
/// `None` when it does not apply to the request kind; the backend sending
/// an empty string is treated the same as omitting the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorizationDecision {
    /// Identity passed to repository hooks during push and pull.
    #[serde(rename = "GL_ID", default, deserialize_with = "non_empty")]
    pub gl_id: Option<String>,

    /// Absolute path of the resolved repository on disk.
    #[serde(rename = "RepoPath", default, deserialize_with = "non_empty")]
    pub repo_path: Option<PathBuf>,

    /// Where a cached copy of a requested archive lives.
    #[serde(rename = "ArchivePath", default, deserialize_with = "non_empty")]
    pub archive_path: Option<PathBuf>,

    /// Directory name archive contents are rooted under.
    #[serde(rename = "ArchivePrefix", default, deserialize_with = "non_empty")]
    pub archive_prefix: Option<String>,

    /// Commit pinned at authorization time.
    #[serde(rename = "CommitId", default, deserialize_with = "non_empty")]
    pub commit_id: Option<String>,

    /// Directory for the temporary file holding an uploaded LFS object.
    #[serde(rename = "StoreLFSPath", default, deserialize_with = "non_empty")]
    pub store_lfs_path: Option<PathBuf>,

    #[serde(rename = "LfsOid", default, deserialize_with = "non_empty")]
    pub lfs_oid: Option<String>,

    /// Byte length of the LFS object; negative sizes are rejected.
    #[serde(rename = "LfsSize", default)]
    pub lfs_size: Option<u64>,

    /// Scratch directory for large uploads.
    #[serde(rename = "TempPath", default, deserialize_with = "non_empty")]
    pub temp_path: Option<PathBuf>,
}

impl AuthorizationDecision {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(T::from))
}
