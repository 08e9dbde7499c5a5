// URL resolution and on-disk naming rules for the mirrored tree.
//
// Every name here is derived from identifiers known before any I/O happens
// (variant index, rendition attributes, segment index), so the layout of the
// output directory is fully predictable for a given manifest tree shape.

use m3u8_rs::AlternativeMedia;
use url::Url;

use crate::error::MirrorError;

/// File name of a rewritten master playlist.
pub const MASTER_PLAYLIST: &str = "master.m3u8";
/// File name of a rewritten media playlist.
pub const MEDIA_PLAYLIST: &str = "media.m3u8";

/// Resolve a reference URI against the manifest that contains it.
///
/// HLS URIs are relative to the playlist they appear in, not to the root
/// manifest, so `base` must always be the immediately containing manifest's
/// URL.
pub(crate) fn resolve_reference(base: &Url, uri: &str) -> Result<Url, MirrorError> {
    base.join(uri)
        .map_err(|e| MirrorError::invalid_url(uri, e.to_string()))
}

/// Subdirectory a variant at position `index` is mirrored into.
pub(crate) fn variant_dir(index: usize) -> String {
    format!("variant{index}")
}

/// Subdirectory an alternative rendition is mirrored into.
///
/// The four classification attributes deterministically name the directory.
/// Renditions sharing an identical (type, group, name, language) tuple
/// overwrite each other's mirror.
pub(crate) fn rendition_dir(alternative: &AlternativeMedia) -> String {
    format!(
        "{}-{}-{}-{}",
        alternative.media_type,
        alternative.group_id,
        alternative.name,
        alternative.language.as_deref().unwrap_or_default(),
    )
}

/// Local file name for the segment at position `index`, preserving the
/// extension of the resolved source URL.
pub(crate) fn segment_file_name(index: usize, url: &Url) -> String {
    format!("segment{index}{}", extension(url))
}

/// Local file name for the decryption key introduced by the segment at
/// position `index`.
pub(crate) fn key_file_name(index: usize) -> String {
    format!("segment{index}.key")
}

// Extension of the URL's path component, including the leading dot. Query
// string and fragment never leak into the local file name.
fn extension(url: &Url) -> &str {
    let file = url.path().rsplit('/').next().unwrap_or_default();
    match file.rfind('.') {
        Some(pos) => &file[pos..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m3u8_rs::AlternativeMediaType;

    #[test]
    fn resolves_relative_to_containing_manifest() {
        let base = Url::parse("https://cdn.example.com/live/low/media.m3u8").unwrap();
        let resolved = resolve_reference(&base, "seg-001.ts").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://cdn.example.com/live/low/seg-001.ts"
        );

        let resolved = resolve_reference(&base, "../audio/media.m3u8").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://cdn.example.com/live/audio/media.m3u8"
        );
    }

    #[test]
    fn rejects_unresolvable_reference() {
        let base = Url::parse("https://cdn.example.com/live/media.m3u8").unwrap();
        let err = resolve_reference(&base, "http://").unwrap_err();
        assert!(matches!(err, MirrorError::InvalidUrl { .. }));
    }

    #[test]
    fn segment_names_keep_the_source_extension() {
        let url = Url::parse("https://cdn.example.com/live/seg-001.ts").unwrap();
        assert_eq!(segment_file_name(0, &url), "segment0.ts");

        // Query string and fragment are not part of the extension.
        let url = Url::parse("https://cdn.example.com/live/seg-001.ts?sig=ab.cd#f").unwrap();
        assert_eq!(segment_file_name(3, &url), "segment3.ts");

        let url = Url::parse("https://cdn.example.com/live/seg-001").unwrap();
        assert_eq!(segment_file_name(12, &url), "segment12");
    }

    #[test]
    fn rendition_dir_uses_the_four_attributes() {
        let alternative = AlternativeMedia {
            media_type: AlternativeMediaType::Audio,
            group_id: "audio".into(),
            name: "en (Main)".into(),
            language: Some("en".into()),
            uri: Some("audio/en.m3u8".into()),
            ..Default::default()
        };
        assert_eq!(rendition_dir(&alternative), "AUDIO-audio-en (Main)-en");
    }

    #[test]
    fn rendition_dir_with_missing_language() {
        let alternative = AlternativeMedia {
            media_type: AlternativeMediaType::Subtitles,
            group_id: "subs".into(),
            name: "Deutsch".into(),
            language: None,
            uri: Some("subs/de.m3u8".into()),
            ..Default::default()
        };
        assert_eq!(rendition_dir(&alternative), "SUBTITLES-subs-Deutsch-");
    }
}
