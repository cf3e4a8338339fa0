//! Object listing through S3 `ListObjectsV2`.

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;

use crate::entry::{Entry, ListingPage, PageRequest, merge_by_key};
use crate::error::ListingError;
use crate::listing::ListingApi;

use super::session::AwsSession;

impl ListingApi for AwsSession {
    fn list_page(&self, request: &PageRequest<'_>) -> Result<ListingPage, ListingError> {
        let mut req = self
            .s3
            .list_objects_v2()
            .bucket(request.container)
            .prefix(request.prefix)
            .delimiter(request.delimiter.to_string());

        if let Some(token) = request.continuation_token {
            req = req.continuation_token(token);
        }

        let resp = self
            .runtime
            .block_on(req.send())
            .map_err(|e| ListingError::Request {
                container: request.container.to_string(),
                prefix: request.prefix.to_string(),
                page: request.page,
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(into_page(resp))
    }
}

/// Convert one response into a page, interleaving common prefixes and objects by key.
fn into_page(resp: ListObjectsV2Output) -> ListingPage {
    let groups = resp
        .common_prefixes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.prefix)
        .map(Entry::group)
        .collect();

    let leaves = resp
        .contents
        .unwrap_or_default()
        .into_iter()
        .filter_map(|obj| {
            let key = obj.key?;
            Some(Entry::leaf(key, obj.size.unwrap_or(0).max(0) as u64))
        })
        .collect();

    let next_continuation_token = if resp.is_truncated == Some(true) {
        resp.next_continuation_token
    } else {
        None
    };

    ListingPage::new(merge_by_key(groups, leaves), next_continuation_token)
}
