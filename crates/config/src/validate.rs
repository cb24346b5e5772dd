//! Configuration validation.
//!
//! Collects every problem found rather than stopping at the first, so
//! the operator sees the full list in one run. Runs before any prompt
//! or bucket operation.

use crate::types::{CorsRule, SiteConfig};

/// Methods accepted in a CORS rule.
pub const ALLOWED_CORS_METHODS: [&str; 5] = ["GET", "PUT", "POST", "DELETE", "HEAD"];

/// Header names the store can set per-object.
pub const ALLOWED_OBJECT_HEADERS: [&str; 5] = [
    "Cache-Control",
    "Content-Type",
    "Content-Encoding",
    "Content-Disposition",
    "Content-Language",
];

/// Validates a configuration, returning every problem found.
pub fn validate(config: &SiteConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(message) = validate_bucket_name(&config.bucket_name) {
        errors.push(message);
    }

    if config.dist_dir.is_empty() {
        errors.push("dist_dir must not be empty".to_string());
    }

    if config.redirect_all_requests_to.is_some()
        && (config.index_document.is_some() || config.error_document.is_some())
    {
        errors.push(
            "redirect_all_requests_to cannot be combined with index_document or error_document"
                .to_string(),
        );
    }

    if let Some(policy) = &config.bucket_policy {
        if !policy.is_object() {
            errors.push("bucket_policy must be a JSON object".to_string());
        }
    }

    if let Some(rules) = &config.cors {
        for (index, rule) in rules.iter().enumerate() {
            validate_cors_rule(index, rule, &mut errors);
        }
    }

    for (pattern, headers) in &config.object_headers {
        if pattern.is_empty() {
            errors.push("object_headers contains an empty pattern".to_string());
        }
        for header in headers {
            if !ALLOWED_OBJECT_HEADERS.contains(&header.name.as_str()) {
                errors.push(format!(
                    "unsupported object header '{}' for pattern '{}'",
                    header.name, pattern
                ));
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Checks a bucket name against the store's naming rules: 3-63 chars,
/// lowercase letters, digits, hyphens and dots, starting and ending
/// alphanumeric, no `..`, not shaped like an IPv4 address.
fn validate_bucket_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("bucket_name is required".to_string());
    }
    if name.len() < 3 || name.len() > 63 {
        return Err(format!(
            "bucket name '{name}' must be between 3 and 63 characters"
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(format!(
            "bucket name '{name}' may only contain lowercase letters, digits, hyphens and dots"
        ));
    }
    let bytes = name.as_bytes();
    let edges_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !edges_ok(bytes[0]) || !edges_ok(bytes[bytes.len() - 1]) {
        return Err(format!(
            "bucket name '{name}' must begin and end with a lowercase letter or digit"
        ));
    }
    if name.contains("..") {
        return Err(format!(
            "bucket name '{name}' must not contain consecutive dots"
        ));
    }
    if looks_like_ipv4(name) {
        return Err(format!(
            "bucket name '{name}' must not be formatted like an IP address"
        ));
    }
    Ok(())
}

fn looks_like_ipv4(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() == 4
        && parts.iter().all(|part| {
            !part.is_empty()
                && part.chars().all(|c| c.is_ascii_digit())
                && part.parse::<u32>().map(|n| n <= 255).unwrap_or(false)
        })
}

fn validate_cors_rule(index: usize, rule: &CorsRule, errors: &mut Vec<String>) {
    if rule.allowed_methods.is_empty() {
        errors.push(format!("cors rule {index} has no allowed_methods"));
    }
    if rule.allowed_origins.is_empty() {
        errors.push(format!("cors rule {index} has no allowed_origins"));
    }
    for method in &rule.allowed_methods {
        if !ALLOWED_CORS_METHODS.contains(&method.as_str()) {
            errors.push(format!(
                "cors rule {index} has unsupported method '{method}'"
            ));
        }
    }
}
