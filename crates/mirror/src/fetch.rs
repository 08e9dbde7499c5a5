// Raw HTTP retrieval for manifests, segments and keys.

use bytes::Bytes;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::error::MirrorError;

/// Fetch a resource, surfacing any non-2xx status as an error.
pub(crate) async fn fetch_bytes(
    client: &Client,
    token: &CancellationToken,
    url: &Url,
) -> Result<Bytes, MirrorError> {
    if token.is_cancelled() {
        return Err(MirrorError::Cancelled);
    }

    debug!(url = %url, "fetching");
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MirrorError::http_status(status, url.as_str()));
    }

    Ok(response.bytes().await?)
}
