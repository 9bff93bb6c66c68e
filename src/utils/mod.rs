pub mod environment;
pub mod paths;
pub mod timestamps;

pub use environment::{DATA_PATH_ENV, DEFAULT_DATA_PATH, resolve_data_path};
pub use paths::{format_path_with_tilde, open_export_file, validate_file_size, with_appended_suffix};
pub use timestamps::{epoch_to_datetime, epoch_to_iso, format_iso, utc_day};
