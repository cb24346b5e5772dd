//! S3 client bridge.
//!
//! Implements the deploy crate's `SiteStore` seam on top of
//! `aws_sdk_s3::Client`. Every method maps SDK failures into
//! `DeployError::Store` with the failed operation named, so the
//! operator sees what broke without an SDK backtrace.

use std::path::Path;

use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CorsConfiguration, CreateBucketConfiguration, Delete,
    ObjectIdentifier,
};
use siteship_config::CorsRule;
use siteship_deploy::{DeployError, ObjectMeta, SiteStore, StoreFuture, WebsiteSettings};
use tracing::debug;

use crate::cors::{default_cors_rules, to_s3_rules};
use crate::policy::policy_document;
use crate::website::website_configuration;

/// `SiteStore` over the AWS S3 SDK.
///
/// Holds the configured client and the resolved region; the region is
/// needed for the location constraint on bucket creation.
pub struct S3SiteStore {
    client: Client,
    region: Option<String>,
}

impl S3SiteStore {
    pub fn new(client: Client, region: Option<String>) -> Self {
        Self { client, region }
    }
}

fn store_err(operation: &str, err: impl std::error::Error) -> DeployError {
    DeployError::Store(format!("{operation}: {}", DisplayErrorContext(err)))
}

impl SiteStore for S3SiteStore {
    fn bucket_exists<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            match self.client.head_bucket().bucket(bucket).send().await {
                Ok(_) => Ok(true),
                Err(SdkError::ServiceError(err)) if err.err().is_not_found() => Ok(false),
                Err(err) => Err(store_err("head bucket", err)),
            }
        })
    }

    fn create_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut request = self.client.create_bucket().bucket(bucket);

            // us-east-1 is the default location and rejects an explicit
            // constraint.
            if let Some(region) = self.region.as_deref().filter(|r| *r != "us-east-1") {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(region))
                        .build(),
                );
            }

            request
                .send()
                .await
                .map_err(|err| store_err("create bucket", err))?;
            Ok(())
        })
    }

    fn empty_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut continuation: Option<String> = None;
            loop {
                let listing = self
                    .client
                    .list_objects_v2()
                    .bucket(bucket)
                    .set_continuation_token(continuation.take())
                    .send()
                    .await
                    .map_err(|err| store_err("list objects", err))?;

                let objects: Vec<ObjectIdentifier> = listing
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(|key| ObjectIdentifier::builder().key(key).build())
                    .collect::<Result<_, _>>()
                    .map_err(|err| store_err("build delete batch", err))?;

                if !objects.is_empty() {
                    debug!(bucket, count = objects.len(), "deleting object batch");
                    let delete = Delete::builder()
                        .set_objects(Some(objects))
                        .build()
                        .map_err(|err| store_err("build delete batch", err))?;
                    self.client
                        .delete_objects()
                        .bucket(bucket)
                        .delete(delete)
                        .send()
                        .await
                        .map_err(|err| store_err("delete objects", err))?;
                }

                match listing.next_continuation_token() {
                    Some(token) if listing.is_truncated() == Some(true) => {
                        continuation = Some(token.to_string());
                    }
                    _ => break,
                }
            }
            Ok(())
        })
    }

    fn delete_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.client
                .delete_bucket()
                .bucket(bucket)
                .send()
                .await
                .map_err(|err| store_err("delete bucket", err))?;
            Ok(())
        })
    }

    fn apply_website_config<'a>(
        &'a self,
        bucket: &'a str,
        website: &'a WebsiteSettings,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let configuration = website_configuration(website)
                .map_err(|err| store_err("build website configuration", err))?;
            self.client
                .put_bucket_website()
                .bucket(bucket)
                .website_configuration(configuration)
                .send()
                .await
                .map_err(|err| store_err("put bucket website", err))?;
            Ok(())
        })
    }

    fn apply_bucket_policy<'a>(
        &'a self,
        bucket: &'a str,
        policy: Option<&'a serde_json::Value>,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let document = policy_document(bucket, policy);
            self.client
                .put_bucket_policy()
                .bucket(bucket)
                .policy(document.to_string())
                .send()
                .await
                .map_err(|err| store_err("put bucket policy", err))?;
            Ok(())
        })
    }

    fn apply_cors_rules<'a>(
        &'a self,
        bucket: &'a str,
        rules: Option<&'a [CorsRule]>,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let rules = match rules {
                Some(rules) => to_s3_rules(rules),
                None => to_s3_rules(&default_cors_rules()),
            }
            .map_err(|err| store_err("build CORS rules", err))?;

            let configuration = CorsConfiguration::builder()
                .set_cors_rules(Some(rules))
                .build()
                .map_err(|err| store_err("build CORS rules", err))?;

            self.client
                .put_bucket_cors()
                .bucket(bucket)
                .cors_configuration(configuration)
                .send()
                .await
                .map_err(|err| store_err("put bucket cors", err))?;
            Ok(())
        })
    }

    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        file: &'a Path,
        meta: &'a ObjectMeta,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let body = ByteStream::from_path(file)
                .await
                .map_err(|err| store_err("read upload file", err))?;

            let mut request = self.client.put_object().bucket(bucket).key(key).body(body);
            if let Some(value) = &meta.content_type {
                request = request.content_type(value);
            }
            if let Some(value) = &meta.cache_control {
                request = request.cache_control(value);
            }
            if let Some(value) = &meta.content_encoding {
                request = request.content_encoding(value);
            }
            if let Some(value) = &meta.content_disposition {
                request = request.content_disposition(value);
            }
            if let Some(value) = &meta.content_language {
                request = request.content_language(value);
            }

            request
                .send()
                .await
                .map_err(|err| store_err("put object", err))?;
            Ok(())
        })
    }
}
