//! Site deploy flow: validate, confirm, provision, configure, upload.
//!
//! This crate implements the **business logic** for deploying a built
//! site directory to a hosting bucket and for tearing the bucket down.
//! It is a library crate with no SDK or terminal dependencies — callers
//! provide a `SiteStore` implementation bridging to the actual object
//! store and a `ConfirmPrompt` for the operator gate.
//!
//! # Deploy pipeline
//!
//! 1. **Validate** — check the configuration, collecting every problem
//! 2. **Confirm** — ask the operator before touching anything
//! 3. **Provision** — create the bucket, or empty an existing one
//! 4. **Configure** — website hosting, access policy, CORS
//! 5. **Upload** — walk the asset directory and put every file

pub mod error;
pub mod orchestrator;
pub mod scanner;
pub mod store;
pub mod types;
pub mod uploader;

// Re-export primary types for convenience.
pub use error::DeployError;
pub use orchestrator::DeployOrchestrator;
pub use scanner::scan_site_files;
pub use store::{ConfirmPrompt, SiteStore, StoreFuture};
pub use types::{DeployOutcome, ObjectMeta, SiteFile, UploadSummary, WebsiteSettings};
pub use uploader::upload_directory;
