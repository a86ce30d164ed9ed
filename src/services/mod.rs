pub mod file_copy;
pub mod file_discovery;
pub mod file_sampling;

pub use file_copy::copy_samples;
pub use file_discovery::{discover_media_files, MediaFiles, MediaScan};
pub use file_sampling::{create_rng, sample_files};
