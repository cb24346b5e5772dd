//! Deploy orchestrator: sequences validate → confirm → provision →
//! configure → upload, and the matching removal flow.

use std::path::Path;

use siteship_config::{RunFlags, SiteConfig, validate};
use tracing::info;

use crate::error::DeployError;
use crate::store::{ConfirmPrompt, SiteStore};
use crate::types::{DeployOutcome, WebsiteSettings};
use crate::uploader::upload_directory;

/// Orchestrates site deployment and removal against a hosting bucket.
///
/// Steps run strictly one after another; a failed store call stops the
/// rest of the sequence and leaves the side effects of earlier steps in
/// place.
pub struct DeployOrchestrator<'a> {
    store: &'a dyn SiteStore,
    prompt: &'a dyn ConfirmPrompt,
    config: &'a SiteConfig,
    flags: RunFlags,
}

impl<'a> DeployOrchestrator<'a> {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        store: &'a dyn SiteStore,
        prompt: &'a dyn ConfirmPrompt,
        config: &'a SiteConfig,
        flags: RunFlags,
    ) -> Self {
        Self {
            store,
            prompt,
            config,
            flags,
        }
    }

    /// Deploys the built site at `site_root` to the configured bucket.
    ///
    /// Validates first, then asks the operator to confirm; declining is
    /// a clean abort. The provisioning branch depends on whether the
    /// bucket already exists, while the configure steps are each gated
    /// solely by their own flag. The upload always runs last.
    pub async fn deploy(&self, site_root: &Path) -> Result<DeployOutcome, DeployError> {
        validate(self.config).map_err(DeployError::InvalidConfig)?;

        if !self.prompt.confirm("Do you want to proceed?").await? {
            info!("deploy aborted by operator");
            return Ok(DeployOutcome::Aborted);
        }

        let bucket = self.config.bucket_name.as_str();

        info!(bucket, "looking up bucket");
        if self.store.bucket_exists(bucket).await? {
            if self.flags.delete_contents {
                info!(bucket, "bucket exists, emptying current contents");
                self.store.empty_bucket(bucket).await?;
            } else {
                info!(bucket, "bucket exists, keeping current contents");
            }
        } else {
            info!(bucket, "bucket not found, creating");
            self.store.create_bucket(bucket).await?;
        }

        if self.flags.config_change {
            let website = WebsiteSettings::from_config(self.config);
            info!(bucket, "applying website hosting configuration");
            self.store.apply_website_config(bucket, &website).await?;
        }

        if self.flags.policy_change {
            info!(bucket, "applying bucket access policy");
            self.store
                .apply_bucket_policy(bucket, self.config.bucket_policy.as_ref())
                .await?;
        }

        if self.flags.cors_change {
            info!(bucket, "applying CORS rules");
            self.store
                .apply_cors_rules(bucket, self.config.cors.as_deref())
                .await?;
        }

        let summary = upload_directory(self.store, self.config, site_root).await?;
        info!(
            bucket,
            files = summary.files,
            bytes = summary.bytes,
            "site deployed"
        );

        Ok(DeployOutcome::Completed)
    }

    /// Removes the deployed site: empties the bucket, then deletes it.
    ///
    /// A bucket that does not exist is a successful no-op, not an
    /// error.
    pub async fn remove(&self) -> Result<DeployOutcome, DeployError> {
        validate(self.config).map_err(DeployError::InvalidConfig)?;

        let bucket = self.config.bucket_name.as_str();

        let question = format!("Are you sure you want to delete bucket '{bucket}'?");
        if !self.prompt.confirm(&question).await? {
            info!("removal aborted by operator");
            return Ok(DeployOutcome::Aborted);
        }

        info!(bucket, "looking up bucket");
        if !self.store.bucket_exists(bucket).await? {
            info!(bucket, "bucket not found, nothing to remove");
            return Ok(DeployOutcome::Completed);
        }

        info!(bucket, "emptying bucket");
        self.store.empty_bucket(bucket).await?;
        info!(bucket, "deleting bucket");
        self.store.delete_bucket(bucket).await?;
        info!(bucket, "site removed");

        Ok(DeployOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreFuture;
    use crate::types::ObjectMeta;
    use siteship_config::CorsRule;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Store mock recording call order, with a configurable existence
    /// answer and an optional call that fails.
    struct RecordingStore {
        exists: bool,
        fail_call: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn new(exists: bool) -> Self {
            Self {
                exists,
                fail_call: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(exists: bool, call: &'static str) -> Self {
            Self {
                fail_call: Some(call),
                ..Self::new(exists)
            }
        }

        fn record(&self, call: &str) -> Result<(), DeployError> {
            self.calls.lock().unwrap().push(call.to_string());
            if self.fail_call == Some(call) {
                Err(DeployError::Store(format!("{call} failed")))
            } else {
                Ok(())
            }
        }

        fn count(&self, call: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.as_str() == call)
                .count()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SiteStore for RecordingStore {
        fn bucket_exists<'a>(&'a self, _bucket: &'a str) -> StoreFuture<'a, bool> {
            Box::pin(async move {
                self.record("bucket_exists")?;
                Ok(self.exists)
            })
        }
        fn create_bucket<'a>(&'a self, _bucket: &'a str) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("create_bucket") })
        }
        fn empty_bucket<'a>(&'a self, _bucket: &'a str) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("empty_bucket") })
        }
        fn delete_bucket<'a>(&'a self, _bucket: &'a str) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("delete_bucket") })
        }
        fn apply_website_config<'a>(
            &'a self,
            _bucket: &'a str,
            _website: &'a WebsiteSettings,
        ) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("apply_website_config") })
        }
        fn apply_bucket_policy<'a>(
            &'a self,
            _bucket: &'a str,
            _policy: Option<&'a serde_json::Value>,
        ) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("apply_bucket_policy") })
        }
        fn apply_cors_rules<'a>(
            &'a self,
            _bucket: &'a str,
            _rules: Option<&'a [CorsRule]>,
        ) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("apply_cors_rules") })
        }
        fn put_object<'a>(
            &'a self,
            _bucket: &'a str,
            _key: &'a str,
            _file: &'a Path,
            _meta: &'a ObjectMeta,
        ) -> StoreFuture<'a, ()> {
            Box::pin(async move { self.record("put_object") })
        }
    }

    /// Prompt mock with a fixed answer, recording the questions asked.
    struct FixedPrompt {
        answer: bool,
        asked: Mutex<Vec<String>>,
    }

    impl FixedPrompt {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: Mutex::new(Vec::new()),
            }
        }

        fn questions(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    impl ConfirmPrompt for FixedPrompt {
        fn confirm<'a>(&'a self, message: &'a str) -> StoreFuture<'a, bool> {
            Box::pin(async move {
                self.asked.lock().unwrap().push(message.to_string());
                Ok(self.answer)
            })
        }
    }

    fn site_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();
        fs::write(dir.path().join("error.html"), b"<h1>404</h1>").unwrap();
        dir
    }

    fn test_config() -> SiteConfig {
        SiteConfig::new("my-test-bucket")
    }

    #[tokio::test]
    async fn deploy_invalid_config_touches_nothing() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = SiteConfig::new("");
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let result = orchestrator.deploy(dir.path()).await;

        match result {
            Err(DeployError::InvalidConfig(errors)) => {
                assert_eq!(errors, vec!["bucket_name is required".to_string()]);
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
        assert!(store.calls().is_empty());
        assert!(prompt.questions().is_empty());
    }

    #[tokio::test]
    async fn deploy_declined_prompt_aborts_without_calls() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(false);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let outcome = orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(outcome, DeployOutcome::Aborted);
        assert_eq!(prompt.questions(), vec!["Do you want to proceed?".to_string()]);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn deploy_existing_bucket_empties_and_uploads() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let outcome = orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(outcome, DeployOutcome::Completed);
        assert_eq!(store.count("bucket_exists"), 1);
        assert_eq!(store.count("empty_bucket"), 1);
        assert_eq!(store.count("create_bucket"), 0);
        assert_eq!(store.count("apply_website_config"), 1);
        assert_eq!(store.count("apply_bucket_policy"), 1);
        assert_eq!(store.count("apply_cors_rules"), 1);
        assert_eq!(store.count("put_object"), 2);
    }

    #[tokio::test]
    async fn deploy_missing_bucket_creates_without_emptying() {
        let dir = site_dir();
        let store = RecordingStore::new(false);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(store.count("create_bucket"), 1);
        assert_eq!(store.count("empty_bucket"), 0);
        assert_eq!(store.count("apply_website_config"), 1);
        assert_eq!(store.count("apply_bucket_policy"), 1);
        assert_eq!(store.count("apply_cors_rules"), 1);
        assert_eq!(store.count("put_object"), 2);
    }

    #[tokio::test]
    async fn deploy_keeps_contents_when_disabled() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let flags = RunFlags {
            delete_contents: false,
            ..RunFlags::default()
        };
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, flags);

        orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(store.count("empty_bucket"), 0);
        assert_eq!(store.count("create_bucket"), 0);
        assert_eq!(store.count("apply_website_config"), 1);
        assert_eq!(store.count("put_object"), 2);
    }

    #[tokio::test]
    async fn deploy_skips_website_config_when_disabled() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let flags = RunFlags {
            config_change: false,
            ..RunFlags::default()
        };
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, flags);

        orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(store.count("apply_website_config"), 0);
        assert_eq!(store.count("empty_bucket"), 1);
        assert_eq!(store.count("apply_bucket_policy"), 1);
        assert_eq!(store.count("apply_cors_rules"), 1);
        assert_eq!(store.count("put_object"), 2);
    }

    #[tokio::test]
    async fn deploy_skips_policy_when_disabled() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let flags = RunFlags {
            policy_change: false,
            ..RunFlags::default()
        };
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, flags);

        orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(store.count("apply_bucket_policy"), 0);
        assert_eq!(store.count("apply_website_config"), 1);
        assert_eq!(store.count("apply_cors_rules"), 1);
        assert_eq!(store.count("put_object"), 2);
    }

    #[tokio::test]
    async fn deploy_skips_cors_when_disabled() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let flags = RunFlags {
            cors_change: false,
            ..RunFlags::default()
        };
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, flags);

        orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(store.count("apply_cors_rules"), 0);
        assert_eq!(store.count("apply_website_config"), 1);
        assert_eq!(store.count("apply_bucket_policy"), 1);
        assert_eq!(store.count("put_object"), 2);
    }

    #[tokio::test]
    async fn deploy_uploads_even_with_every_step_disabled() {
        let dir = site_dir();
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let flags = RunFlags {
            delete_contents: false,
            config_change: false,
            policy_change: false,
            cors_change: false,
        };
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, flags);

        let outcome = orchestrator.deploy(dir.path()).await.unwrap();

        assert_eq!(outcome, DeployOutcome::Completed);
        assert_eq!(store.count("put_object"), 2);
        assert_eq!(
            store
                .calls()
                .iter()
                .filter(|c| c.as_str() != "bucket_exists" && c.as_str() != "put_object")
                .count(),
            0
        );
    }

    #[tokio::test]
    async fn deploy_store_failure_stops_the_sequence() {
        let dir = site_dir();
        let store = RecordingStore::failing_on(true, "empty_bucket");
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let result = orchestrator.deploy(dir.path()).await;

        assert!(matches!(result, Err(DeployError::Store(_))));
        assert_eq!(store.count("empty_bucket"), 1);
        assert_eq!(store.count("apply_website_config"), 0);
        assert_eq!(store.count("put_object"), 0);
    }

    #[tokio::test]
    async fn remove_asks_with_the_bucket_name() {
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        orchestrator.remove().await.unwrap();

        assert_eq!(
            prompt.questions(),
            vec!["Are you sure you want to delete bucket 'my-test-bucket'?".to_string()]
        );
    }

    #[tokio::test]
    async fn remove_declined_prompt_makes_no_calls() {
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(false);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let outcome = orchestrator.remove().await.unwrap();

        assert_eq!(outcome, DeployOutcome::Aborted);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn remove_missing_bucket_is_a_noop() {
        let store = RecordingStore::new(false);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let outcome = orchestrator.remove().await.unwrap();

        assert_eq!(outcome, DeployOutcome::Completed);
        assert_eq!(store.calls(), vec!["bucket_exists".to_string()]);
    }

    #[tokio::test]
    async fn remove_empties_then_deletes() {
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let outcome = orchestrator.remove().await.unwrap();

        assert_eq!(outcome, DeployOutcome::Completed);
        assert_eq!(
            store.calls(),
            vec![
                "bucket_exists".to_string(),
                "empty_bucket".to_string(),
                "delete_bucket".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn remove_invalid_config_touches_nothing() {
        let store = RecordingStore::new(true);
        let prompt = FixedPrompt::new(true);
        let config = SiteConfig::new("Bad_Bucket");
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let result = orchestrator.remove().await;

        assert!(matches!(result, Err(DeployError::InvalidConfig(_))));
        assert!(store.calls().is_empty());
        assert!(prompt.questions().is_empty());
    }

    #[tokio::test]
    async fn remove_delete_failure_propagates() {
        let store = RecordingStore::failing_on(true, "delete_bucket");
        let prompt = FixedPrompt::new(true);
        let config = test_config();
        let orchestrator = DeployOrchestrator::new(&store, &prompt, &config, RunFlags::default());

        let result = orchestrator.remove().await;

        assert!(matches!(result, Err(DeployError::Store(_))));
        assert_eq!(store.count("empty_bucket"), 1);
    }
}
