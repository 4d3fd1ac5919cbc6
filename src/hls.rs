// SPDX-License-Identifier: MPL-2.0
//! Minimal HLS playlist parsing.
//!
//! Covers exactly what the video screen needs: enumerating the variants of a
//! master playlist and deriving a stream duration from the segment durations
//! of a media playlist. Tags outside that scope are ignored.

use crate::error::{Error, Result};

/// One `#EXT-X-STREAM-INF` entry of a master playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub uri: String,
    pub bandwidth: Option<u64>,
    pub resolution: Option<(u32, u32)>,
}

/// A parsed `.m3u8` document.
#[derive(Debug, Clone, PartialEq)]
pub enum Playlist {
    /// A master playlist listing variant streams.
    Master(Vec<Variant>),
    /// A media playlist of segments.
    Media {
        /// Sum of the `#EXTINF` segment durations, in seconds.
        duration_secs: f32,
        segment_count: usize,
        /// Whether the playlist carries `#EXT-X-ENDLIST` (VOD vs. live).
        ended: bool,
    },
}

/// Parses an `.m3u8` document.
///
/// A playlist containing any `#EXT-X-STREAM-INF` tag is treated as a master
/// playlist; otherwise it is read as a media playlist.
pub fn parse(text: &str) -> Result<Playlist> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    if lines.next() != Some("#EXTM3U") {
        return Err(Error::Playlist("missing #EXTM3U header".into()));
    }

    let mut variants = Vec::new();
    let mut pending_variant: Option<(Option<u64>, Option<(u32, u32)>)> = None;
    let mut duration_secs = 0.0_f32;
    let mut pending_segment = false;
    let mut segment_count = 0;
    let mut ended = false;

    for line in lines {
        if let Some(attrs) = line.strip_prefix("#EXT-X-STREAM-INF:") {
            pending_variant = Some(parse_stream_inf(attrs));
        } else if let Some(info) = line.strip_prefix("#EXTINF:") {
            duration_secs += parse_extinf(info)?;
            pending_segment = true;
        } else if line == "#EXT-X-ENDLIST" {
            ended = true;
        } else if line.starts_with('#') {
            // Unhandled tag.
        } else if let Some((bandwidth, resolution)) = pending_variant.take() {
            variants.push(Variant {
                uri: line.to_string(),
                bandwidth,
                resolution,
            });
        } else if pending_segment {
            segment_count += 1;
            pending_segment = false;
        }
    }

    if !variants.is_empty() {
        Ok(Playlist::Master(variants))
    } else if segment_count > 0 {
        Ok(Playlist::Media {
            duration_secs,
            segment_count,
            ended,
        })
    } else {
        Err(Error::Playlist("no variants or segments found".into()))
    }
}

/// Resolves a possibly relative playlist URI against the URL it came from.
#[must_use]
pub fn resolve_uri(base: &str, uri: &str) -> String {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return uri.to_string();
    }
    match base.rfind('/') {
        // Keep the scheme separator intact for pathological bases.
        Some(pos) if pos > "https:/".len() => format!("{}/{}", &base[..pos], uri),
        _ => format!("{}/{}", base.trim_end_matches('/'), uri),
    }
}

fn parse_extinf(info: &str) -> Result<f32> {
    let duration = info.split(',').next().unwrap_or_default();
    duration
        .trim()
        .parse::<f32>()
        .map_err(|_| Error::Playlist(format!("invalid #EXTINF duration: {duration}")))
}

fn parse_stream_inf(attrs: &str) -> (Option<u64>, Option<(u32, u32)>) {
    let mut bandwidth = None;
    let mut resolution = None;

    for (key, value) in attribute_pairs(attrs) {
        match key.as_str() {
            "BANDWIDTH" => bandwidth = value.parse::<u64>().ok(),
            "RESOLUTION" => {
                if let Some((w, h)) = value.split_once('x') {
                    if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                        resolution = Some((w, h));
                    }
                }
            }
            _ => {}
        }
    }

    (bandwidth, resolution)
}

/// Splits an attribute list on commas, honoring quoted values that may
/// themselves contain commas (e.g. `CODECS="avc1.4d401f,mp4a.40.2"`).
fn attribute_pairs(attrs: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = attrs;

    while !rest.is_empty() {
        let Some((key, tail)) = rest.split_once('=') else {
            break;
        };
        let (value, remainder) = if let Some(quoted) = tail.strip_prefix('"') {
            match quoted.split_once('"') {
                Some((value, after)) => (
                    value.to_string(),
                    after.strip_prefix(',').unwrap_or(after),
                ),
                None => (quoted.to_string(), ""),
            }
        } else {
            match tail.split_once(',') {
                Some((value, after)) => (value.to_string(), after),
                None => (tail.to_string(), ""),
            }
        };
        pairs.push((key.trim().to_string(), value));
        rest = remainder;
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U\n\
        #EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=2149280,CODECS=\"mp4a.40.2,avc1.64001f\",RESOLUTION=1280x720\n\
        url_0/193039199_mp4_h264_aac_hd_7.m3u8\n\
        #EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=246440,RESOLUTION=320x184\n\
        url_2/193039199_mp4_h264_aac_ld_7.m3u8\n";

    const MEDIA: &str = "#EXTM3U\n\
        #EXT-X-TARGETDURATION:11\n\
        #EXT-X-VERSION:3\n\
        #EXT-X-MEDIA-SEQUENCE:0\n\
        #EXTINF:10.0,\n\
        segment0.ts\n\
        #EXTINF:10.0,\n\
        segment1.ts\n\
        #EXTINF:5.5,\n\
        segment2.ts\n\
        #EXT-X-ENDLIST\n";

    #[test]
    fn parses_master_playlist_variants() {
        let playlist = parse(MASTER).expect("master playlist should parse");
        let Playlist::Master(variants) = playlist else {
            panic!("expected master playlist");
        };

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].bandwidth, Some(2_149_280));
        assert_eq!(variants[0].resolution, Some((1280, 720)));
        assert_eq!(variants[0].uri, "url_0/193039199_mp4_h264_aac_hd_7.m3u8");
        assert_eq!(variants[1].resolution, Some((320, 184)));
    }

    #[test]
    fn quoted_codecs_attribute_does_not_break_parsing() {
        let playlist = parse(MASTER).expect("master playlist should parse");
        let Playlist::Master(variants) = playlist else {
            panic!("expected master playlist");
        };
        // BANDWIDTH comes after the quoted CODECS list in the raw text.
        assert!(variants[0].bandwidth.is_some());
    }

    #[test]
    fn sums_media_playlist_segment_durations() {
        let playlist = parse(MEDIA).expect("media playlist should parse");
        assert_eq!(
            playlist,
            Playlist::Media {
                duration_secs: 25.5,
                segment_count: 3,
                ended: true,
            }
        );
    }

    #[test]
    fn live_playlist_is_not_marked_ended() {
        let live = MEDIA.replace("#EXT-X-ENDLIST\n", "");
        let playlist = parse(&live).expect("live playlist should parse");
        let Playlist::Media { ended, .. } = playlist else {
            panic!("expected media playlist");
        };
        assert!(!ended);
    }

    #[test]
    fn rejects_document_without_header() {
        assert!(matches!(
            parse("#EXTINF:10.0,\nsegment0.ts\n"),
            Err(crate::error::Error::Playlist(_))
        ));
    }

    #[test]
    fn rejects_empty_playlist() {
        assert!(parse("#EXTM3U\n#EXT-X-VERSION:3\n").is_err());
    }

    #[test]
    fn rejects_bad_extinf_duration() {
        let bad = "#EXTM3U\n#EXTINF:abc,\nsegment0.ts\n";
        assert!(parse(bad).is_err());
    }

    #[test]
    fn resolve_uri_keeps_absolute_urls() {
        assert_eq!(
            resolve_uri("https://example.com/streams/master.m3u8", "https://cdn.example.com/a.m3u8"),
            "https://cdn.example.com/a.m3u8"
        );
    }

    #[test]
    fn resolve_uri_joins_relative_paths() {
        assert_eq!(
            resolve_uri("https://example.com/streams/master.m3u8", "url_0/chunk.m3u8"),
            "https://example.com/streams/url_0/chunk.m3u8"
        );
    }
}
