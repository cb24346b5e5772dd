//! Directory upload.
//!
//! Walks the built site and puts every file sequentially, resolving for
//! each the object key, the content type, and the configured header
//! overrides.

use std::path::Path;

use siteship_config::{ALL_OBJECTS, ObjectHeader, SiteConfig};
use tracing::{debug, info};

use crate::error::DeployError;
use crate::scanner::scan_site_files;
use crate::store::SiteStore;
use crate::types::{ObjectMeta, UploadSummary};

/// Uploads the site at `root` to the configured bucket.
///
/// Files upload one at a time; a failure stops the run and leaves
/// already-uploaded objects in place.
pub async fn upload_directory(
    store: &dyn SiteStore,
    config: &SiteConfig,
    root: &Path,
) -> Result<UploadSummary, DeployError> {
    let (files, total_bytes) = scan_site_files(root)?;
    info!(
        files = files.len(),
        total_bytes,
        dir = %root.display(),
        "uploading site assets"
    );

    for file in &files {
        let key = object_key(config.bucket_prefix.as_deref(), &file.relative_path);
        let meta = object_meta(config, &file.relative_path);
        debug!(key = %key, size = file.size, "uploading object");
        store
            .put_object(&config.bucket_name, &key, &file.path, &meta)
            .await?;
    }

    Ok(UploadSummary {
        files: files.len(),
        bytes: total_bytes,
    })
}

/// Builds the object key for a file, prepending the configured prefix.
pub fn object_key(prefix: Option<&str>, relative_path: &str) -> String {
    match prefix.map(|p| p.trim_matches('/')) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}/{relative_path}"),
        _ => relative_path.to_string(),
    }
}

/// Resolves upload metadata for one file.
///
/// The content type is guessed from the extension; configured header
/// rules then override it. Rule specificity: `ALL_OBJECTS` < `*.ext` <
/// `folder/` < exact path, later overriding earlier.
pub fn object_meta(config: &SiteConfig, relative_path: &str) -> ObjectMeta {
    let mut meta = ObjectMeta {
        content_type: mime_guess::from_path(relative_path)
            .first_raw()
            .map(str::to_string),
        ..ObjectMeta::default()
    };

    let rules = &config.object_headers;

    if let Some(headers) = rules.get(ALL_OBJECTS) {
        apply_headers(&mut meta, headers);
    }

    if let Some(ext) = Path::new(relative_path).extension().and_then(|e| e.to_str()) {
        if let Some(headers) = rules.get(&format!("*.{ext}")) {
            apply_headers(&mut meta, headers);
        }
    }

    // Folder rules, shortest prefix first so deeper folders override.
    let mut folders: Vec<&String> = rules
        .keys()
        .filter(|k| k.ends_with('/') && relative_path.starts_with(k.as_str()))
        .collect();
    folders.sort_by_key(|k| k.len());
    for folder in folders {
        apply_headers(&mut meta, &rules[folder]);
    }

    if let Some(headers) = rules.get(relative_path) {
        apply_headers(&mut meta, headers);
    }

    meta
}

fn apply_headers(meta: &mut ObjectMeta, headers: &[ObjectHeader]) {
    for header in headers {
        let value = Some(header.value.clone());
        match header.name.as_str() {
            "Cache-Control" => meta.cache_control = value,
            "Content-Type" => meta.content_type = value,
            "Content-Encoding" => meta.content_encoding = value,
            "Content-Disposition" => meta.content_disposition = value,
            "Content-Language" => meta.content_language = value,
            // Unknown names are rejected by validation before a run starts.
            _ => {}
        }
    }
}
