use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the export file
pub const DATA_PATH_ENV: &str = "CONVERSATIONS_DATA_PATH";

/// Export location used when neither a flag nor the environment names one
pub const DEFAULT_DATA_PATH: &str = "../data/conversations.json";

/// Resolve the export path: explicit path, then `CONVERSATIONS_DATA_PATH`, then the default
pub fn resolve_data_path(explicit: Option<&Path>) -> PathBuf {
    resolve_data_path_internal(explicit, env::var_os(DATA_PATH_ENV).map(PathBuf::from))
}

pub(crate) fn resolve_data_path_internal(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or(from_env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let resolved = resolve_data_path_internal(
            Some(Path::new("/explicit.json")),
            Some(PathBuf::from("/from-env.json")),
        );
        assert_eq!(resolved, PathBuf::from("/explicit.json"));
    }

    #[test]
    fn test_env_path_used_without_explicit() {
        let resolved = resolve_data_path_internal(None, Some(PathBuf::from("/from-env.json")));
        assert_eq!(resolved, PathBuf::from("/from-env.json"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(resolve_data_path_internal(None, None), PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(
            resolve_data_path_internal(None, Some(PathBuf::new())),
            PathBuf::from(DEFAULT_DATA_PATH)
        );
    }
}
