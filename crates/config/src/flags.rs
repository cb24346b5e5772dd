//! Per-invocation switches gating individual deploy steps.

/// Which deploy steps run.
///
/// Every switch defaults to on; the CLI's `--no-*` flags turn single
/// steps off. Constructed once per invocation and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunFlags {
    /// Empty an existing bucket before re-use.
    pub delete_contents: bool,
    /// Apply the website hosting configuration.
    pub config_change: bool,
    /// Apply the bucket access policy.
    pub policy_change: bool,
    /// Apply the CORS rule set.
    pub cors_change: bool,
}

impl Default for RunFlags {
    fn default() -> Self {
        Self {
            delete_contents: true,
            config_change: true,
            policy_change: true,
            cors_change: true,
        }
    }
}
