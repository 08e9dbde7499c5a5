// Strict decode / encode around the m3u8 playlist format.

use m3u8_rs::{MasterPlaylist, MediaPlaylist, Playlist};
use url::Url;

use crate::error::MirrorError;

/// Decode a manifest body, classifying it as a master or media playlist.
///
/// `m3u8-rs` itself is lenient about the `#EXTM3U` header; in strict mode a
/// body missing it is rejected outright instead of being decoded as an empty
/// media playlist.
pub(crate) fn decode(bytes: &[u8], url: &Url, strict: bool) -> Result<Playlist, MirrorError> {
    if strict && !has_m3u_header(bytes) {
        return Err(MirrorError::playlist(
            url.as_str(),
            "missing #EXTM3U header",
        ));
    }

    m3u8_rs::parse_playlist_res(bytes)
        .map_err(|e| MirrorError::playlist(url.as_str(), format!("{e}")))
}

fn has_m3u_header(bytes: &[u8]) -> bool {
    let body = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    match body.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(start) => body[start..].starts_with(b"#EXTM3U"),
        None => false,
    }
}

pub(crate) fn encode_master(playlist: &MasterPlaylist) -> Result<Vec<u8>, MirrorError> {
    let mut buffer = Vec::new();
    playlist.write_to(&mut buffer)?;
    Ok(buffer)
}

pub(crate) fn encode_media(playlist: &MediaPlaylist) -> Result<Vec<u8>, MirrorError> {
    let mut buffer = Vec::new();
    playlist.write_to(&mut buffer)?;
    Ok(buffer)
}
