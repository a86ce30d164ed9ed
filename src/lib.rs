pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

// Re-export commonly used types
pub use error::SamplerError;
pub use models::{CopiedFile, ExtensionSet, SampleReport, DEFAULT_MEDIA_EXTENSIONS};
pub use services::{
    copy_samples, create_rng, discover_media_files, sample_files, MediaFiles, MediaScan,
};
pub use utils::validate_seed_dir;

/// Report format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(SamplerError::InvalidArgument(format!(
                "unknown format '{}', expected text or json",
                other
            ))),
        }
    }
}

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed_dir: PathBuf,
    pub test_dir: PathBuf,
    pub count: usize,
    pub extensions: ExtensionSet,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_dir: PathBuf::new(),
            test_dir: PathBuf::from("test_source"),
            count: 100,
            extensions: ExtensionSet::media_defaults(),
            seed: None,
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

/// Discover, sample and copy. The seed directory is validated before
/// anything is created under `test_dir`.
pub fn run_sampler(config: &AppConfig) -> Result<SampleReport> {
    validate_seed_dir(&config.seed_dir)?;

    let scan = MediaScan::new(&config.seed_dir, config.extensions.clone())?;
    let candidates: Vec<PathBuf> = scan.iter().collect();
    info!(
        "Discovered {} candidate files under {:?} ({} extensions)",
        candidates.len(),
        scan.root(),
        scan.extensions().len()
    );

    let mut rng = create_rng(config.seed);
    let selected = sample_files(&candidates, config.count, &mut rng);
    info!("Selected {} of {} candidates", selected.len(), candidates.len());

    // Nothing matched: leave the destination untouched
    let copied_files = if candidates.is_empty() {
        Vec::new()
    } else {
        copy_samples(&selected, &config.test_dir)?
    };

    Ok(SampleReport::new(
        config.seed_dir.clone(),
        config.test_dir.clone(),
        config.count,
        config.seed,
        config.extensions.clone(),
        candidates.len(),
        copied_files,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_config_matches_cli_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.count, 100);
        assert_eq!(config.test_dir, PathBuf::from("test_source"));
        assert_eq!(config.extensions, ExtensionSet::media_defaults());
        assert!(config.seed.is_none());
    }
}
