//! Website hosting configuration documents.

use aws_sdk_s3::error::BuildError;
use aws_sdk_s3::types::{
    ErrorDocument, IndexDocument, RedirectAllRequestsTo, WebsiteConfiguration,
};
use siteship_deploy::WebsiteSettings;

/// Builds the hosting configuration sent to the service.
pub fn website_configuration(
    settings: &WebsiteSettings,
) -> Result<WebsiteConfiguration, BuildError> {
    let builder = WebsiteConfiguration::builder();
    let configured = match settings {
        WebsiteSettings::RedirectAll { host } => builder
            .redirect_all_requests_to(RedirectAllRequestsTo::builder().host_name(host).build()?),
        WebsiteSettings::Documents { index, error } => builder
            .index_document(IndexDocument::builder().suffix(index).build()?)
            .error_document(ErrorDocument::builder().key(error).build()?),
    };
    Ok(configured.build())
}
