pub mod file_operations;

pub use file_operations::{
    copy_file_preserving_metadata, ensure_directory, matches_extensions, resolve_destination,
    validate_seed_dir,
};
