//! Mirror manifest: the TOML file naming the framework, the document
//! corpus, the sample projects and the sessions one run operates on.

use crate::samples::SampleProject;
use crate::transcript::WwdcSession;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_base_url() -> String {
    "https://developer.apple.com/tutorials/data/documentation".to_string()
}

fn default_samples_base_url() -> String {
    "https://docs-assets.developer.apple.com/published".to_string()
}

fn default_notes_base_url() -> String {
    "https://raw.githubusercontent.com/WWDCNotes/WWDCNotes/main/Sources/WWDCNotes/WWDCNotes.docc"
        .to_string()
}

fn default_language() -> String {
    "swift".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Manifest {
    /// Framework display name ("ScreenCaptureKit").
    pub framework: String,
    /// Documentation bundle identifier; derived from the framework name
    /// when not given.
    bundle: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_samples_base_url")]
    pub samples_base_url: String,
    #[serde(default = "default_notes_base_url")]
    pub notes_base_url: String,
    /// Language tag for fenced blocks without their own.
    #[serde(default = "default_language")]
    pub language: String,
    /// Corpus paths relative to the base URL, without the `.json` suffix.
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub samples: Vec<SampleProject>,
    #[serde(default)]
    pub wwdc: Vec<WwdcSession>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manifest: Manifest = toml::from_str(&content)
            .with_context(|| format!("invalid manifest: {}", path.display()))?;
        Ok(manifest)
    }

    pub fn bundle(&self) -> String {
        match &self.bundle {
            Some(bundle) => bundle.clone(),
            None => format!("com.apple.{}", self.framework.to_lowercase()),
        }
    }
}
