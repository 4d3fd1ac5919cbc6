// SPDX-License-Identifier: MPL-2.0
//! Async network fetches behind the web and video screens.
//!
//! These run inside `Task::perform` on the runtime's thread pool; the
//! screens receive the results as messages.

use crate::error::{Error, Result};
use crate::hls::{self, Playlist};
use crate::player::StreamInfo;
use crate::web::{self, PageInfo};

const USER_AGENT: &str = concat!("SlideKick/", env!("CARGO_PKG_VERSION"));

fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::from)
}

/// Fetches a web page and reports what was found.
///
/// Non-success statuses are not an error here; the page model shows them.
pub async fn load_page(url: String) -> Result<PageInfo> {
    let response = client()?.get(&url).send().await?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let body = response.bytes().await?;

    let title = web::extract_title(&String::from_utf8_lossy(&body));

    Ok(PageInfo {
        final_url,
        status,
        body_bytes: body.len(),
        title,
    })
}

/// Fetches an HLS stream's playlists and resolves its facts.
///
/// A master playlist is followed into its first variant to derive the
/// stream duration from the media playlist's segment durations.
pub async fn load_stream(url: String) -> Result<StreamInfo> {
    let client = client()?;

    match parse_document(&client, &url).await? {
        Playlist::Media { duration_secs, .. } => Ok(StreamInfo {
            variants: Vec::new(),
            duration_secs,
        }),
        Playlist::Master(variants) => {
            let first = variants
                .first()
                .ok_or_else(|| Error::Playlist("master playlist has no variants".into()))?;
            let media_url = hls::resolve_uri(&url, &first.uri);

            let duration_secs = match parse_document(&client, &media_url).await? {
                Playlist::Media { duration_secs, .. } => duration_secs,
                // A master pointing at another master is out of scope.
                Playlist::Master(_) => {
                    return Err(Error::Playlist("nested master playlist".into()));
                }
            };

            Ok(StreamInfo {
                variants,
                duration_secs,
            })
        }
    }
}

async fn parse_document(client: &reqwest::Client, url: &str) -> Result<Playlist> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Http(format!(
            "HTTP status {} for {url}",
            response.status()
        )));
    }

    let text = response.text().await?;
    hls::parse(&text)
}
