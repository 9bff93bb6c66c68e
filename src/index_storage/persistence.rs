//! Index persistence: restore-or-build with atomic writes

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bincode::config;

use super::metadata::{INDEX_FORMAT_VERSION, IndexMetadata, SourceFileMetadata};
use crate::search::FullTextIndex;
use crate::utils::{format_path_with_tilde, with_appended_suffix};

const INDEX_SUFFIX: &str = ".index";
const METADATA_SUFFIX: &str = ".index.meta.json";
const CACHE_INDEX_FILENAME: &str = "search-index.bin";
const CACHE_METADATA_FILENAME: &str = "index-metadata.json";

/// Where the persisted index for an export lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexLocation {
    /// Next to the export file
    #[default]
    Sidecar,
    /// In the platform cache directory
    Cache,
}

/// Load/save of a built index, independent of the serialization format
pub trait IndexStore {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// `Ok(None)` when there is nothing usable to restore (missing, outdated, stale)
    fn load(&self) -> Result<Option<FullTextIndex>>;

    fn save(&self, index: &FullTextIndex) -> Result<()>;
}

/// Restore the index from `store`, or build it and persist the result.
///
/// Load failures are logged and fall back to `build`; so are save failures.
/// With `force_rebuild` the restore step is skipped.
pub fn restore_or_build<S, F>(store: &S, force_rebuild: bool, build: F) -> FullTextIndex
where
    S: IndexStore + ?Sized,
    F: FnOnce() -> FullTextIndex,
{
    if !force_rebuild {
        match store.load() {
            Ok(Some(index)) => {
                log::info!("Loaded search index from {}", store.describe());
                return index;
            }
            Ok(None) => log::debug!("No usable search index at {}", store.describe()),
            Err(e) => {
                log::warn!("Failed to load search index from {}: {:#}", store.describe(), e)
            }
        }
    }

    let index = build();
    match store.save(&index) {
        Ok(()) => log::info!("Saved search index to {}", store.describe()),
        Err(e) => log::warn!("Failed to save search index to {}: {:#}", store.describe(), e),
    }
    index
}

/// Bincode index + JSON metadata, one pair per export path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarStore {
    source_path: PathBuf,
    index_path: PathBuf,
    metadata_path: PathBuf,
}

impl SidecarStore {
    /// Store next to the export: `<export>.index` and `<export>.index.meta.json`
    pub fn next_to(source_path: &Path) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            index_path: with_appended_suffix(source_path, INDEX_SUFFIX),
            metadata_path: with_appended_suffix(source_path, METADATA_SUFFIX),
        }
    }

    /// Store in the platform cache directory, isolated per canonical export path
    pub fn in_cache_dir(source_path: &Path) -> Result<Self> {
        let cache_dir = get_cache_dir(source_path)?;
        Ok(Self {
            source_path: source_path.to_path_buf(),
            index_path: cache_dir.join(CACHE_INDEX_FILENAME),
            metadata_path: cache_dir.join(CACHE_METADATA_FILENAME),
        })
    }

    pub fn for_location(source_path: &Path, location: IndexLocation) -> Result<Self> {
        match location {
            IndexLocation::Sidecar => Ok(Self::next_to(source_path)),
            IndexLocation::Cache => Self::in_cache_dir(source_path),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }
}

impl IndexStore for SidecarStore {
    fn describe(&self) -> String {
        format_path_with_tilde(&self.index_path)
    }

    fn load(&self) -> Result<Option<FullTextIndex>> {
        // Check if both files exist
        if !self.metadata_path.exists() || !self.index_path.exists() {
            return Ok(None);
        }

        let metadata_json =
            fs::read_to_string(&self.metadata_path).context("Failed to read metadata file")?;
        let metadata: IndexMetadata =
            serde_json::from_str(&metadata_json).context("Failed to parse metadata JSON")?;

        if metadata.version != INDEX_FORMAT_VERSION {
            log::info!(
                "Index format version mismatch (expected {}, found {}), rebuilding index",
                INDEX_FORMAT_VERSION,
                metadata.version
            );
            return Ok(None);
        }

        if metadata.source.is_stale(&self.source_path)? {
            log::info!(
                "{} changed since the index was built, rebuilding index",
                format_path_with_tilde(&self.source_path)
            );
            return Ok(None);
        }

        let index_bytes = fs::read(&self.index_path).context("Failed to read index file")?;
        let (index, _): (FullTextIndex, usize) =
            bincode::serde::decode_from_slice(&index_bytes, config::standard())
                .context("Failed to deserialize index")?;

        if index.len() != metadata.document_count {
            bail!(
                "Index holds {} documents but metadata records {}",
                index.len(),
                metadata.document_count
            );
        }

        Ok(Some(index))
    }

    fn save(&self, index: &FullTextIndex) -> Result<()> {
        let source = SourceFileMetadata::from_path(&self.source_path)
            .context("Failed to read export file metadata")?;
        let metadata = IndexMetadata::new(index.len(), source);

        // Index first: metadata without a matching index is never left behind
        let index_bytes = bincode::serde::encode_to_vec(index, config::standard())
            .context("Failed to serialize index")?;
        write_atomically(&self.index_path, &index_bytes)?;

        let metadata_json =
            serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
        write_atomically(&self.metadata_path, metadata_json.as_bytes())?;

        Ok(())
    }
}

/// Write via a temp file + rename so readers never see a partial file
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = with_appended_suffix(path, ".tmp");
    fs::write(&temp, bytes)
        .with_context(|| format!("Failed to write temp file: {}", temp.display()))?;
    fs::rename(&temp, path)
        .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;
    Ok(())
}

/// Compute hash of canonical path for cache subdirectory isolation
/// Returns first 12 characters of the hex hash
fn compute_path_hash(path: &Path) -> Result<String> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    // Canonicalize to handle symlinks and relative paths consistently
    let canonical = path.canonicalize().context("Failed to canonicalize path")?;

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    let hash = hasher.finish();

    Ok(format!("{:016x}", hash)[..12].to_string())
}

/// Get platform-specific cache directory for a specific export file
pub fn get_cache_dir(source_path: &Path) -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;

    let path_hash = compute_path_hash(source_path)?;
    let cache_dir = cache_base.join("chat-archive-explorer").join(path_hash);

    if !cache_dir.exists() {
        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;
    }

    Ok(cache_dir)
}
