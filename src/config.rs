//! Runtime configuration for loading an archive.

use std::path::{Path, PathBuf};

use crate::index_storage::IndexLocation;
use crate::utils::resolve_data_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Export file (JSON array of conversations)
    pub data_path: PathBuf,
    /// Where the persisted search index is read from and written to
    pub index_location: IndexLocation,
    /// Ignore any persisted index and build a fresh one
    pub rebuild_index: bool,
}

impl ExplorerConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            index_location: IndexLocation::default(),
            rebuild_index: false,
        }
    }

    /// Config for an explicit path, else `CONVERSATIONS_DATA_PATH`, else the default export path
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::new(resolve_data_path(explicit))
    }

    pub fn with_index_location(mut self, location: IndexLocation) -> Self {
        self.index_location = location;
        self
    }

    pub fn with_rebuild_index(mut self, rebuild: bool) -> Self {
        self.rebuild_index = rebuild;
        self
    }
}
