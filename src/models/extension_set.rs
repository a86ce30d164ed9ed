use serde::Serialize;
use std::collections::BTreeSet;

/// Media extensions used when no explicit filter is given
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".heic", ".raw", ".nef", ".cr2", ".mp4", ".mov", ".hevc", ".m4v",
];

/// Canonical set of lowercase, dot-prefixed extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    /// Normalize arbitrary extension strings. `"JPG"` and `".jpg"` end up identical.
    pub fn normalize<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        )
    }

    pub fn media_defaults() -> Self {
        Self::normalize(DEFAULT_MEDIA_EXTENSIONS)
    }

    /// Falls back to the media defaults when `extensions` is empty
    pub fn from_user_input_or_default(extensions: &[String]) -> Self {
        if extensions.is_empty() {
            Self::media_defaults()
        } else {
            Self::normalize(extensions)
        }
    }

    /// `suffix` must already be lowercase and dot-prefixed
    pub fn contains(&self, suffix: &str) -> bool {
        self.0.contains(suffix)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::media_defaults()
    }
}

fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
