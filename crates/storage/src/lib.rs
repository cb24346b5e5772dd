//! S3-backed implementation of the deploy store.
//!
//! `S3SiteStore` bridges the deploy flow to `aws-sdk-s3`: bucket
//! lifecycle, website hosting configuration, access policy, CORS, and
//! object uploads. The documents sent to the service are produced by
//! the pure builder modules so they can be tested without a client.

pub mod cors;
pub mod policy;
pub mod s3;
pub mod website;

pub use s3::S3SiteStore;
