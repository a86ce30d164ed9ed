pub mod extension_set;
pub mod sample_report;

pub use extension_set::{ExtensionSet, DEFAULT_MEDIA_EXTENSIONS};
pub use sample_report::{CopiedFile, SampleReport};
