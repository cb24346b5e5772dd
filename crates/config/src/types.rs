//! Configuration types for a site deployment target.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pattern key in `object_headers` whose headers apply to every object.
pub const ALL_OBJECTS: &str = "ALL_OBJECTS";

/// Settings for a single site deployment target.
///
/// Parsed from the configuration file and validated once before a run;
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Globally-scoped bucket name the site deploys into.
    pub bucket_name: String,

    /// Key prefix prepended to every uploaded object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_prefix: Option<String>,

    /// Directory of built site assets, relative to the configuration file.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,

    /// Website index document. `index.html` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_document: Option<String>,

    /// Website error document. `error.html` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_document: Option<String>,

    /// Redirect every request to this host instead of serving documents.
    /// Mutually exclusive with explicit index/error documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_all_requests_to: Option<String>,

    /// Access-policy override. When unset a public-read policy for the
    /// bucket is generated at apply time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_policy: Option<serde_json::Value>,

    /// CORS override. When unset a default rule set is applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<Vec<CorsRule>>,

    /// Per-file upload headers, keyed by pattern: [`ALL_OBJECTS`], a
    /// folder prefix ending in `/`, an extension glob `*.ext`, or an
    /// exact relative path.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub object_headers: BTreeMap<String, Vec<ObjectHeader>>,
}

impl SiteConfig {
    /// Creates a configuration with only the bucket name set and every
    /// optional setting at its default.
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            bucket_prefix: None,
            dist_dir: default_dist_dir(),
            index_document: None,
            error_document: None,
            redirect_all_requests_to: None,
            bucket_policy: None,
            cors: None,
            object_headers: BTreeMap::new(),
        }
    }
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

/// A single CORS rule attached to the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsRule {
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expose_headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<i32>,
}

/// One header applied to uploaded objects matching a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectHeader {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_json_roundtrip() {
        let mut config = SiteConfig::new("my-site-bucket");
        config.bucket_prefix = Some("v2".into());
        config.object_headers.insert(
            "*.css".into(),
            vec![ObjectHeader {
                name: "Cache-Control".into(),
                value: "max-age=86400".into(),
            }],
        );

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("index_document"));
        assert!(!json.contains("redirect_all_requests_to"));
        let parsed: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let config: SiteConfig = serde_yaml::from_str("bucket_name: my-site-bucket\n").unwrap();
        assert_eq!(config.bucket_name, "my-site-bucket");
        assert_eq!(config.dist_dir, "dist");
        assert!(config.bucket_prefix.is_none());
        assert!(config.cors.is_none());
        assert!(config.object_headers.is_empty());
    }

    #[test]
    fn yaml_with_cors_and_headers() {
        let raw = r#"
bucket_name: my-site-bucket
dist_dir: build
cors:
  - allowed_methods: [GET, HEAD]
    allowed_origins: ["https://example.com"]
    max_age_seconds: 3600
object_headers:
  ALL_OBJECTS:
    - name: Cache-Control
      value: max-age=60
"#;
        let config: SiteConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config.dist_dir, "build");
        let cors = config.cors.as_ref().unwrap();
        assert_eq!(cors[0].allowed_methods, vec!["GET", "HEAD"]);
        assert_eq!(cors[0].max_age_seconds, Some(3600));
        assert!(config.object_headers.contains_key(ALL_OBJECTS));
    }
}
