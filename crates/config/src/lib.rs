//! Deployment settings for siteship.
//!
//! Holds the configuration types driving a run (`SiteConfig`), the
//! per-invocation step switches (`RunFlags`), and the pure validator
//! that checks a configuration before anything touches the bucket.

pub mod flags;
pub mod types;
pub mod validate;

// Re-export primary types for convenience.
pub use flags::RunFlags;
pub use types::{ALL_OBJECTS, CorsRule, ObjectHeader, SiteConfig};
pub use validate::validate;
