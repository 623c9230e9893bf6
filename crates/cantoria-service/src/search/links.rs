//! Link builders for YouTube videos and the external MP3 converter.

use url::Url;

use cantoria_core::constants::YOUTUBE_WATCH_BASE;

use crate::error::{ServiceError, ServiceResult};

/// Video IDs are 11 characters from the URL-safe base64 alphabet.
const VIDEO_ID_LEN: usize = 11;

#[must_use]
pub fn watch_url(video_id: &str) -> String {
    format!("{YOUTUBE_WATCH_BASE}{video_id}")
}

/// ## Summary
/// Parses the configured converter base. The video ID is appended to its
/// path, so it must be a hierarchical URL.
///
/// ## Errors
/// Returns `InvalidConfiguration` if the base is not such a URL.
pub fn converter_base(raw: &str) -> ServiceResult<Url> {
    let base = Url::parse(raw).map_err(|err| {
        ServiceError::InvalidConfiguration(format!("search.converter_base_url: {err}"))
    })?;
    if base.cannot_be_a_base() {
        return Err(ServiceError::InvalidConfiguration(format!(
            "search.converter_base_url cannot carry a path: {raw}"
        )));
    }
    Ok(base)
}

/// Appends `video_id` as the last path segment of `base`.
#[must_use]
pub fn converter_url(base: &Url, video_id: &str) -> String {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(video_id);
    }
    url.into()
}

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Parses `input`, assuming `https` when the scheme is left out.
fn parse_lenient(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{input}")).ok()
        }
        Err(_) => None,
    }
}

/// ## Summary
/// Extracts the video ID from a watch URL (`watch?v=`), a short URL
/// (`youtu.be/`), an embed or shorts URL, or a bare ID.
#[must_use]
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_video_id(input) {
        return Some(input.to_string());
    }

    let url = parse_lenient(input)?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);
    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());

    let candidate = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            "embed" | "shorts" | "live" | "v" => segments.next().map(str::to_string),
            _ => None,
        },
        _ => None,
    }?;

    is_video_id(&candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn recognises_every_url_shape() {
        for input in [
            ID,
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42",
            "http://m.youtube.com/watch?v=dQw4w9WgXcQ#comments",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
            "  youtu.be/dQw4w9WgXcQ  ",
        ] {
            assert_eq!(extract_video_id(input).as_deref(), Some(ID), "input: {input}");
        }
    }

    #[test]
    fn hosts_are_case_insensitive_and_ports_are_allowed() {
        for input in [
            "https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ",
            "https://YouTu.Be/dQw4w9WgXcQ",
            "https://youtube.com:443/watch?v=dQw4w9WgXcQ",
            "http://www.youtube.com:8080/embed/dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_video_id(input).as_deref(), Some(ID), "input: {input}");
        }
    }

    #[test]
    fn rejects_other_hosts_and_bad_ids() {
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/feed/trending"), None);
        assert_eq!(extract_video_id("ftp://youtube.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("not a video"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn builds_links() {
        assert_eq!(watch_url(ID), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

        let base = converter_base("https://www.y2mate.com/youtube/").expect("valid base");
        assert_eq!(
            converter_url(&base, ID),
            "https://www.y2mate.com/youtube/dQw4w9WgXcQ"
        );

        let bare = converter_base("https://conv.example").expect("valid base");
        assert_eq!(converter_url(&bare, ID), "https://conv.example/dQw4w9WgXcQ");
    }

    #[test]
    fn converter_base_must_be_hierarchical() {
        assert!(matches!(
            converter_base("mailto:mp3@example.com"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            converter_base("y2mate.com/youtube/"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
    }
}
