//! YouTube Data API client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use cantoria_core::config::SearchConfig;

use crate::error::{ServiceError, ServiceResult};

const USER_AGENT: &str = concat!("cantoria/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// API response types, trimmed to the fields in use.

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub(crate) id: SearchItemId,
    pub(crate) snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItemId {
    pub(crate) video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    pub(crate) title: String,
    pub(crate) channel_title: String,
    #[serde(default)]
    pub(crate) thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub(crate) high: Option<Thumbnail>,
    pub(crate) medium: Option<Thumbnail>,
    pub(crate) default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub(crate) url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub(crate) items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoItem {
    pub(crate) id: String,
    pub(crate) content_details: Option<ContentDetails>,
    pub(crate) statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentDetails {
    pub(crate) duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statistics {
    pub(crate) view_count: Option<String>,
}

/// A search hit merged with its video details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: Option<String>,
    /// ISO 8601 duration as returned by the API, e.g. `PT4M13S`.
    pub iso_duration: Option<String>,
    pub views: Option<u64>,
}

/// ## Summary
/// Joins search hits with the details returned by the videos endpoint.
/// Hits without a video ID (channels, playlists) are dropped.
pub(crate) fn merge(search: SearchResponse, details: VideosResponse) -> Vec<Video> {
    let mut details: HashMap<String, VideoItem> = details
        .items
        .into_iter()
        .map(|item| (item.id.clone(), item))
        .collect();

    search
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            let detail = details.remove(&id);
            let thumbnails = item.snippet.thumbnails;
            let thumbnail = thumbnails
                .high
                .or(thumbnails.medium)
                .or(thumbnails.default)
                .map(|t| t.url);
            let (iso_duration, views) = match detail {
                Some(detail) => (
                    detail.content_details.map(|c| c.duration),
                    detail
                        .statistics
                        .and_then(|s| s.view_count)
                        .and_then(|v| v.parse().ok()),
                ),
                None => (None, None),
            };

            Some(Video {
                id,
                title: item.snippet.title,
                channel: item.snippet.channel_title,
                thumbnail,
                iso_duration,
                views,
            })
        })
        .collect()
}

/// Drops the request URL, which carries the API key.
fn upstream(err: reqwest::Error) -> ServiceError {
    let err = err.without_url();
    tracing::warn!(error = %err, "YouTube request failed");
    ServiceError::UpstreamError(format!("YouTube: {err}"))
}

/// YouTube Data API v3 client. No retries.
///
/// Built once at startup and shared; the inner [`Client`] pools connections.
#[derive(Clone)]
pub struct YoutubeClient {
    http: Client,
    api_key: Option<String>,
    api_base: String,
    max_results: u8,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("api_key", &self.api_key.as_ref().map(|_key| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl YoutubeClient {
    /// ## Errors
    /// Returns `UpstreamError` if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, api_base: &str, max_results: u8) -> ServiceResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(upstream)?;

        Ok(Self {
            http,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            max_results,
        })
    }

    /// ## Errors
    /// Returns `UpstreamError` if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> ServiceResult<Self> {
        Self::new(
            config.youtube_api_key.clone(),
            &config.api_base_url,
            config.max_results,
        )
    }

    /// ## Summary
    /// Runs a video search and fetches duration and view counts for the hits.
    ///
    /// ## Errors
    /// Returns `UpstreamError` when no API key is configured, on transport
    /// failures, non-success statuses and unparseable responses.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Video>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ServiceError::UpstreamError("YouTube API key is not configured".to_string())
        })?;
        let max_results = self.max_results.to_string();
        let search: SearchResponse = self
            .http
            .get(format!("{}/search", self.api_base))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("key", api_key),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        let ids: Vec<&str> = search
            .items
            .iter()
            .filter_map(|item| item.id.video_id.as_deref())
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.join(",");

        let details: VideosResponse = self
            .http
            .get(format!("{}/videos", self.api_base))
            .query(&[
                ("part", "contentDetails,statistics"),
                ("id", ids.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        let videos = merge(search, details);
        tracing::debug!(count = videos.len(), "YouTube search completed");

        Ok(videos)
    }
}
