//! Bucket access policy documents.

use serde_json::{Value, json};

/// Resolves the policy document to apply: a configured override is
/// used verbatim, otherwise the generated public-read policy.
pub fn policy_document(bucket: &str, custom: Option<&Value>) -> Value {
    match custom {
        Some(policy) => policy.clone(),
        None => public_read_policy(bucket),
    }
}

/// Default policy granting anonymous read access to every object in
/// the bucket, which is what serving a public website needs.
pub fn public_read_policy(bucket: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicReadGetObject",
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{bucket}/*")]
        }]
    })
}
