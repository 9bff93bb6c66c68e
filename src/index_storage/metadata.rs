//! Side-car metadata for staleness detection

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Artifact format version; bump when the serialized index layout changes
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Metadata written next to the serialized index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub version: u32,
    pub document_count: usize,
    pub built_at: DateTime<Utc>,
    pub source: SourceFileMetadata,
}

impl IndexMetadata {
    pub fn new(document_count: usize, source: SourceFileMetadata) -> Self {
        Self { version: INDEX_FORMAT_VERSION, document_count, built_at: Utc::now(), source }
    }
}

/// Size and modification time of the export the index was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileMetadata {
    pub mtime_secs: i64,
    pub size: u64,
}

impl SourceFileMetadata {
    /// Create metadata from file path
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let metadata = fs::metadata(path)?;
        let mtime = metadata.modified()?;
        let mtime_secs = mtime.duration_since(SystemTime::UNIX_EPOCH)?.as_secs() as i64;

        Ok(Self { mtime_secs, size: metadata.len() })
    }

    /// Check if file has changed (mtime or size differs)
    pub fn is_stale(&self, path: &Path) -> anyhow::Result<bool> {
        let current = Self::from_path(path)?;
        Ok(self.mtime_secs != current.mtime_secs || self.size != current.size)
    }
}
