//! CORS rule construction.

use aws_sdk_s3::error::BuildError;
use aws_sdk_s3::types::CorsRule as S3CorsRule;
use siteship_config::CorsRule;

/// Default rule set applied when the configuration carries no CORS
/// override: allow GET from any origin.
pub fn default_cors_rules() -> Vec<CorsRule> {
    vec![CorsRule {
        allowed_methods: vec!["GET".to_string()],
        allowed_origins: vec!["*".to_string()],
        allowed_headers: Vec::new(),
        expose_headers: Vec::new(),
        max_age_seconds: None,
    }]
}

/// Converts configured rules into the SDK's rule type.
pub fn to_s3_rules(rules: &[CorsRule]) -> Result<Vec<S3CorsRule>, BuildError> {
    rules
        .iter()
        .map(|rule| {
            let mut builder = S3CorsRule::builder()
                .set_allowed_methods(Some(rule.allowed_methods.clone()))
                .set_allowed_origins(Some(rule.allowed_origins.clone()));
            if !rule.allowed_headers.is_empty() {
                builder = builder.set_allowed_headers(Some(rule.allowed_headers.clone()));
            }
            if !rule.expose_headers.is_empty() {
                builder = builder.set_expose_headers(Some(rule.expose_headers.clone()));
            }
            if let Some(age) = rule.max_age_seconds {
                builder = builder.max_age_seconds(age);
            }
            builder.build()
        })
        .collect()
}
