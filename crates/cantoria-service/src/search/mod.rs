//! Video search passthrough and MP3 converter links.
//!
//! Nothing here downloads or transcodes media. The converter link points at
//! a third-party site.

pub mod depot;
pub mod links;
pub mod youtube;

use serde::{Deserialize, Serialize};
use url::Url;

use cantoria_core::config::SearchConfig;
use cantoria_db::db::enums::LiturgicalSection;

use crate::error::{ServiceError, ServiceResult};
use crate::program::parse_section;
use crate::util::{optional_text, search_term};

pub use youtube::{Video, YoutubeClient};

const QUERY_SUFFIX: &str = "música católica";

/// A search result as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "canal")]
    pub channel: String,
    pub thumbnail: Option<String>,
    #[serde(rename = "duracao")]
    pub duration: Option<String>,
    #[serde(rename = "visualizacoes")]
    pub views: Option<u64>,
    pub link_youtube: String,
    pub link_mp3: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertInput {
    #[serde(default, alias = "videoId")]
    pub video_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedLinks {
    pub video_id: String,
    pub link_youtube: String,
    pub link_mp3: String,
}

/// Query sent to YouTube: the user's terms, a catholic-music hint and the
/// section label when one is chosen.
#[must_use]
pub fn build_query(q: &str, section: Option<LiturgicalSection>) -> String {
    match section {
        Some(section) => format!("{} {QUERY_SUFFIX} {}", q.trim(), section.label()),
        None => format!("{} {QUERY_SUFFIX}", q.trim()),
    }
}

/// ## Summary
/// Formats an ISO 8601 duration (`PT1H2M3S`) as `H:MM:SS`, or `M:SS` when
/// under an hour. Returns `None` for anything else.
#[must_use]
pub fn format_duration(iso: &str) -> Option<String> {
    let rest = iso.strip_prefix('P')?;
    let (days, time) = match rest.split_once('T') {
        Some((days, time)) => (days, time),
        None => (rest, ""),
    };

    let mut total: u64 = 0;
    if !days.is_empty() {
        let days: u64 = days.strip_suffix('D')?.parse().ok()?;
        total = days.checked_mul(86_400)?;
    }

    let mut number = String::new();
    for c in time.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let value: u64 = number.parse().ok()?;
        number.clear();
        let seconds = match c {
            'H' => value.checked_mul(3_600)?,
            'M' => value.checked_mul(60)?,
            'S' => value,
            _ => return None,
        };
        total = total.checked_add(seconds)?;
    }
    if !number.is_empty() {
        return None;
    }

    let (hours, minutes, seconds) = (total / 3_600, total % 3_600 / 60, total % 60);
    Some(if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    })
}

fn to_hit(video: Video, converter_base: &Url) -> SearchHit {
    SearchHit {
        link_youtube: links::watch_url(&video.id),
        link_mp3: links::converter_url(converter_base, &video.id),
        duration: video.iso_duration.as_deref().and_then(format_duration),
        id: video.id,
        title: video.title,
        channel: video.channel,
        thumbnail: video.thumbnail,
        views: video.views,
    }
}

/// ## Summary
/// Searches YouTube for catholic music through the shared `client`.
///
/// ## Errors
/// - `ValidationError` if `q` is blank
/// - `InvalidSection` if `section` is given and unknown
/// - `InvalidConfiguration` if the converter base URL is malformed
/// - `UpstreamError` if no API key is configured or the API call fails
#[tracing::instrument(skip(client, config))]
pub async fn search_music(
    client: &YoutubeClient,
    config: &SearchConfig,
    q: Option<&str>,
    section: Option<&str>,
) -> ServiceResult<Vec<SearchHit>> {
    let q = search_term(q)
        .ok_or_else(|| ServiceError::ValidationError("q is required".to_string()))?;
    let section = match search_term(section) {
        Some(raw) => Some(parse_section(Some(raw))?),
        None => None,
    };
    let converter_base = links::converter_base(&config.converter_base_url)?;

    let videos = client.search(&build_query(q, section)).await?;

    Ok(videos
        .into_iter()
        .map(|video| to_hit(video, &converter_base))
        .collect())
}

/// ## Summary
/// Builds the watch and converter links for a video given by ID or URL.
///
/// ## Errors
/// Returns `ValidationError` when no YouTube video ID can be extracted, or
/// `InvalidConfiguration` if the converter base URL is malformed.
pub fn convert(config: &SearchConfig, input: ConvertInput) -> ServiceResult<ConvertedLinks> {
    let raw = optional_text(input.video_id)
        .or_else(|| optional_text(input.url))
        .ok_or_else(|| ServiceError::ValidationError("video_id or url is required".to_string()))?;
    let video_id = links::extract_video_id(&raw)
        .ok_or_else(|| ServiceError::ValidationError(format!("not a YouTube video: {raw}")))?;

    let converter_base = links::converter_base(&config.converter_base_url)?;

    Ok(ConvertedLinks {
        link_youtube: links::watch_url(&video_id),
        link_mp3: links::converter_url(&converter_base, &video_id),
        video_id,
    })
}
