// Manifest mirror: recursive tree walk over a remote HLS manifest, writing a
// self-contained local copy.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use m3u8_rs::{MasterPlaylist, MediaPlaylist, Playlist};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use crate::codec;
use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::fetch;
use crate::layout;

/// Mirrors an HLS manifest tree to local disk.
///
/// A master playlist is expanded recursively: every variant is mirrored into
/// `variant<i>/` and every alternative rendition into
/// `<type>-<group>-<name>-<language>/`, with the reference rewritten to the
/// mirrored copy. A media playlist has its segments (and decryption keys)
/// downloaded next to it under index-stable names. The rewritten playlist is
/// only persisted after all of its children have been written, and the first
/// error encountered aborts the whole build unmodified.
pub struct MirrorBuilder {
    client: reqwest::Client,
    config: MirrorConfig,
    token: CancellationToken,
}

impl MirrorBuilder {
    pub fn new() -> Result<Self, MirrorError> {
        Self::with_config(MirrorConfig::default())
    }

    pub fn with_config(config: MirrorConfig) -> Result<Self, MirrorError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            token: CancellationToken::new(),
        })
    }

    /// Propagate cancellation from `token`: the build fails fast with
    /// [`MirrorError::Cancelled`] before the next fetch once cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Mirror the manifest tree rooted at `manifest_url` into `directory`.
    ///
    /// The directory is created if absent (parents included); pre-existing
    /// contents are not cleared, so re-running into a non-empty directory is
    /// unsupported.
    pub async fn build(&self, manifest_url: &Url, directory: &Path) -> Result<(), MirrorError> {
        self.build_playlist(manifest_url.clone(), directory.to_path_buf())
            .await
    }

    // Recursion goes through a boxed future: nested playlists (variants,
    // alternative renditions) are mirrored by the same routine.
    fn build_playlist(&self, url: Url, dir: PathBuf) -> BoxFuture<'_, Result<(), MirrorError>> {
        Box::pin(async move {
            tokio::fs::create_dir_all(&dir).await?;

            let body = fetch::fetch_bytes(&self.client, &self.token, &url).await?;
            match codec::decode(&body, &url, self.config.strict)? {
                Playlist::MasterPlaylist(master) => self.mirror_master(master, &url, &dir).await,
                Playlist::MediaPlaylist(media) => self.mirror_media(media, &url, &dir).await,
            }
        })
    }

    async fn mirror_master(
        &self,
        mut master: MasterPlaylist,
        url: &Url,
        dir: &Path,
    ) -> Result<(), MirrorError> {
        info!(
            url = %url,
            variants = master.variants.len(),
            renditions = master.alternatives.len(),
            "mirroring master playlist"
        );

        for (index, variant) in master.variants.iter_mut().enumerate() {
            let target = layout::resolve_reference(url, &variant.uri)?;
            let subdir = layout::variant_dir(index);
            self.build_playlist(target, dir.join(&subdir)).await?;
            variant.uri = format!("{subdir}/{}", layout::MEDIA_PLAYLIST);
        }

        for alternative in master.alternatives.iter_mut() {
            // Renditions without a URI (e.g. embedded closed captions) have
            // nothing to mirror.
            let Some(uri) = alternative.uri.as_deref() else {
                continue;
            };
            let target = layout::resolve_reference(url, uri)?;
            let subdir = layout::rendition_dir(alternative);
            self.build_playlist(target, dir.join(&subdir)).await?;
            alternative.uri = Some(format!("{subdir}/{}", layout::MEDIA_PLAYLIST));
        }

        let text = codec::encode_master(&master)?;
        tokio::fs::write(dir.join(layout::MASTER_PLAYLIST), text).await?;
        Ok(())
    }

    async fn mirror_media(
        &self,
        mut media: MediaPlaylist,
        url: &Url,
        dir: &Path,
    ) -> Result<(), MirrorError> {
        info!(
            url = %url,
            segments = media.segments.len(),
            "mirroring media playlist"
        );

        for (index, segment) in media.segments.iter_mut().enumerate() {
            // A key tag is attached to the segment that introduced it; the
            // downloaded key takes that segment's index and the tag is kept
            // in the rewritten playlist pointing at the local file.
            if let Some(key) = segment.key.as_mut()
                && let Some(key_uri) = key.uri.as_deref()
            {
                let target = layout::resolve_reference(url, key_uri)?;
                let data = fetch::fetch_bytes(&self.client, &self.token, &target).await?;
                let local = layout::key_file_name(index);
                tokio::fs::write(dir.join(&local), &data).await?;
                debug!(url = %target, file = %local, "downloaded decryption key");
                key.uri = Some(local);
            }

            let target = layout::resolve_reference(url, &segment.uri)?;
            let data = fetch::fetch_bytes(&self.client, &self.token, &target).await?;
            let local = layout::segment_file_name(index, &target);
            tokio::fs::write(dir.join(&local), &data).await?;
            debug!(url = %target, file = %local, "downloaded segment");
            segment.uri = local;
        }

        let text = codec::encode_media(&media)?;
        tokio::fs::write(dir.join(layout::MEDIA_PLAYLIST), text).await?;
        Ok(())
    }
}
