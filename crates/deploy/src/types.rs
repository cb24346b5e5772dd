//! Data types for the deploy flow.

use std::path::PathBuf;

use siteship_config::SiteConfig;

/// Index document served when no override is configured.
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// Error document served when no override is configured.
pub const DEFAULT_ERROR_DOCUMENT: &str = "error.html";

/// How a command run ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Every gated step ran to completion.
    Completed,
    /// The operator declined the confirmation prompt. Not an error; no
    /// side effects were performed.
    Aborted,
}

/// Website hosting settings resolved from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebsiteSettings {
    /// Serve index/error documents from the bucket.
    Documents { index: String, error: String },
    /// Redirect every request to another host.
    RedirectAll { host: String },
}

impl WebsiteSettings {
    /// Resolves hosting settings, filling in the
    /// `index.html`/`error.html` defaults. The redirect rule wins when
    /// configured; validation rejects configs carrying both.
    pub fn from_config(config: &SiteConfig) -> Self {
        match &config.redirect_all_requests_to {
            Some(host) => Self::RedirectAll { host: host.clone() },
            None => Self::Documents {
                index: config
                    .index_document
                    .clone()
                    .unwrap_or_else(|| DEFAULT_INDEX_DOCUMENT.to_string()),
                error: config
                    .error_document
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ERROR_DOCUMENT.to_string()),
            },
        }
    }
}

/// Per-object upload metadata resolved from content-type detection and
/// the configured header rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub content_encoding: Option<String>,
    pub content_disposition: Option<String>,
    pub content_language: Option<String>,
}

/// One local file discovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    /// Path relative to the scanned root, `/`-separated.
    pub relative_path: String,
    /// Absolute path on disk.
    pub path: PathBuf,
    pub size: u64,
}

/// What a completed upload pushed to the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub files: usize,
    pub bytes: u64,
}
