use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

// Maximum size for an export file: 2GB
const MAX_EXPORT_SIZE_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Opens an export file and validates its size on the open handle
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not a regular file, or is
/// larger than the export size limit.
pub fn open_export_file(path: &Path) -> Result<File> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open export file: {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    if !metadata.is_file() {
        bail!("Not a regular file: {}", path.display());
    }
    validate_file_size(&file, path)?;
    Ok(file)
}

/// Validates that a file's size is within the export size limit
///
/// Takes an open file handle so the size check and the subsequent read see the
/// same file.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 2GB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_EXPORT_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_EXPORT_SIZE_BYTES
        );
    }

    Ok(())
}

/// Appends a suffix to the full file name (`conversations.json` → `conversations.json.index`)
pub fn with_appended_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Display form of a path with the home directory shown as `~`
///
/// ```no_run
/// use std::path::Path;
/// use chat_archive_explorer::utils::format_path_with_tilde;
///
/// // "~/exports/conversations.json" when the home directory is /home/alice
/// let shown = format_path_with_tilde(Path::new("/home/alice/exports/conversations.json"));
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, dirs::home_dir().as_deref())
}

/// Only whole path components match, so `/home/al` is not a prefix of `/home/alice`
pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => Path::new("~").join(rest).display().to_string(),
        None => path.display().to_string(),
    }
}
