//! Collaborator seams for the deploy flow.
//!
//! `SiteStore` is implemented by the storage crate on top of the real
//! object-store SDK; `ConfirmPrompt` by the CLI on top of the terminal.
//! Using traits keeps deploy logic decoupled from both and testable
//! with mocks.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use siteship_config::CorsRule;

use crate::error::DeployError;
use crate::types::{ObjectMeta, WebsiteSettings};

/// Boxed future returned by collaborator trait methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DeployError>> + Send + 'a>>;

/// Abstract interface to the hosting bucket's object store.
///
/// Every call is treated as atomic by the orchestrator: failures
/// propagate unhandled, with no retries and no partial-result
/// reporting.
pub trait SiteStore: Send + Sync {
    /// Checks whether the bucket exists.
    fn bucket_exists<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, bool>;

    /// Creates the bucket.
    fn create_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, ()>;

    /// Deletes every object the bucket currently holds.
    fn empty_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, ()>;

    /// Deletes the bucket itself. The bucket must already be empty.
    fn delete_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, ()>;

    /// Applies the website hosting configuration.
    fn apply_website_config<'a>(
        &'a self,
        bucket: &'a str,
        website: &'a WebsiteSettings,
    ) -> StoreFuture<'a, ()>;

    /// Applies the access policy. `None` means the store's default
    /// public-read policy for the bucket.
    fn apply_bucket_policy<'a>(
        &'a self,
        bucket: &'a str,
        policy: Option<&'a serde_json::Value>,
    ) -> StoreFuture<'a, ()>;

    /// Applies the CORS rule set. `None` means the default rules.
    fn apply_cors_rules<'a>(
        &'a self,
        bucket: &'a str,
        rules: Option<&'a [CorsRule]>,
    ) -> StoreFuture<'a, ()>;

    /// Uploads one local file to `key`.
    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        file: &'a Path,
        meta: &'a ObjectMeta,
    ) -> StoreFuture<'a, ()>;
}

/// Operator confirmation gate.
///
/// Blocks until the operator answers, with no timeout. Declining is a
/// clean abort of the run, not an error.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm<'a>(&'a self, message: &'a str) -> StoreFuture<'a, bool>;
}
