//! Video link classifier.
//!
//! Recognizes links to the supported video platforms and derives a stable
//! video id, an embed URL and (for YouTube) a thumbnail URL. Matchers run in
//! the fixed order of [`PLATFORM_PRIORITY`] and the first hit wins. Anything
//! unrecognized, including strings that are not URLs at all, classifies as
//! "not a video".

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
    Tiktok,
    Instagram,
}

impl VideoPlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoPlatform::Youtube => "youtube",
            VideoPlatform::Vimeo => "vimeo",
            VideoPlatform::Tiktok => "tiktok",
            VideoPlatform::Instagram => "instagram",
        }
    }
}

/// Matcher order. Earlier platforms win when several patterns could match.
pub const PLATFORM_PRIORITY: [VideoPlatform; 4] = [
    VideoPlatform::Youtube,
    VideoPlatform::Vimeo,
    VideoPlatform::Tiktok,
    VideoPlatform::Instagram,
];

/// YouTube thumbnail quality tier used for link cards.
pub const YOUTUBE_THUMBNAIL_TIER: &str = "mqdefault.jpg";

/// Classification result for a single URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VideoInfo {
    pub is_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub platform: Option<VideoPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub embed_url: Option<String>,
}

impl VideoInfo {
    pub fn not_video() -> Self {
        Self::default()
    }
}

/* --------------------------------------------------------------------------
Patterns
-------------------------------------------------------------------------- */

/// Optional scheme, then any subdomains (`www.`, `m.`, `player.`).
const HOST_PREFIX: &str = r"^(?:https?://)?(?:[a-z0-9-]+\.)*";

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){HOST_PREFIX}(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|v/|live/)|youtu\.be/)([A-Za-z0-9_-]{{11}})(?:[?&#/]|$)"
    ))
    .expect("valid regex")
});

static VIMEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){HOST_PREFIX}vimeo\.com/(?:video/|channels/[\w-]+/)?(\d+)(?:[?&#/]|$)"
    ))
    .expect("valid regex")
});

static TIKTOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){HOST_PREFIX}tiktok\.com/@[\w.-]+/video/(\d+)(?:[?&#/]|$)"
    ))
    .expect("valid regex")
});

static TIKTOK_SHORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:vm|vt)\.tiktok\.com/[A-Za-z0-9]+/?(?:[?#]|$)")
        .expect("valid regex")
});

static INSTAGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){HOST_PREFIX}instagram\.com/(?:p|reels?|tv)/([A-Za-z0-9_-]+)(?:[?&#/]|$)"
    ))
    .expect("valid regex")
});

/* --------------------------------------------------------------------------
Classification
-------------------------------------------------------------------------- */

/// Classify a URL. Never fails; unrecognized input is `is_video: false`.
pub fn classify(url: &str) -> VideoInfo {
    let url = url.trim();
    if url.is_empty() {
        return VideoInfo::not_video();
    }

    PLATFORM_PRIORITY
        .iter()
        .find_map(|platform| match_platform(*platform, url))
        .unwrap_or_else(VideoInfo::not_video)
}

/// Shorthand for `classify(url).is_video`.
pub fn is_video_url(url: &str) -> bool {
    classify(url).is_video
}

fn match_platform(platform: VideoPlatform, url: &str) -> Option<VideoInfo> {
    match platform {
        VideoPlatform::Youtube => capture_id(&YOUTUBE_RE, url).map(|id| VideoInfo {
            is_video: true,
            platform: Some(platform),
            thumbnail_url: Some(format!(
                "https://img.youtube.com/vi/{id}/{YOUTUBE_THUMBNAIL_TIER}"
            )),
            embed_url: Some(format!("https://www.youtube.com/embed/{id}")),
            video_id: Some(id),
        }),
        VideoPlatform::Vimeo => capture_id(&VIMEO_RE, url).map(|id| VideoInfo {
            is_video: true,
            platform: Some(platform),
            thumbnail_url: None,
            embed_url: Some(format!("https://player.vimeo.com/video/{id}")),
            video_id: Some(id),
        }),
        VideoPlatform::Tiktok => match capture_id(&TIKTOK_RE, url) {
            Some(id) => Some(VideoInfo {
                is_video: true,
                platform: Some(platform),
                thumbnail_url: None,
                embed_url: Some(format!("https://www.tiktok.com/embed/v2/{id}")),
                video_id: Some(id),
            }),
            // Short links hide the numeric id behind a redirect.
            None if TIKTOK_SHORT_RE.is_match(url) => Some(VideoInfo {
                is_video: true,
                platform: Some(platform),
                ..VideoInfo::default()
            }),
            None => None,
        },
        VideoPlatform::Instagram => capture_id(&INSTAGRAM_RE, url).map(|id| VideoInfo {
            is_video: true,
            platform: Some(platform),
            thumbnail_url: None,
            embed_url: Some(format!("https://www.instagram.com/p/{id}/embed")),
            video_id: Some(id),
        }),
    }
}

fn capture_id(re: &Regex, url: &str) -> Option<String> {
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtu_be_short_link() {
        let info = classify("https://youtu.be/dQw4w9WgXcQ");
        assert!(info.is_video);
        assert_eq!(info.platform, Some(VideoPlatform::Youtube));
        assert_eq!(info.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            info.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg")
        );
        assert_eq!(
            info.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn youtube_url_forms() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1",
            "youtube.com/live/dQw4w9WgXcQ",
            "HTTPS://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ",
            "  https://youtu.be/dQw4w9WgXcQ?si=abc  ",
        ] {
            let info = classify(url);
            assert_eq!(info.platform, Some(VideoPlatform::Youtube), "{url}");
            assert_eq!(info.video_id.as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn youtube_channel_page_is_not_a_video() {
        assert!(!is_video_url("https://www.youtube.com/@creator"));
        assert!(!is_video_url("https://www.youtube.com/watch?v=short"));
    }

    #[test]
    fn vimeo_forms() {
        for url in [
            "https://vimeo.com/76979871",
            "https://player.vimeo.com/video/76979871",
            "https://vimeo.com/channels/staffpicks/76979871",
        ] {
            let info = classify(url);
            assert_eq!(info.platform, Some(VideoPlatform::Vimeo), "{url}");
            assert_eq!(info.video_id.as_deref(), Some("76979871"), "{url}");
            assert_eq!(
                info.embed_url.as_deref(),
                Some("https://player.vimeo.com/video/76979871")
            );
            assert!(info.thumbnail_url.is_none());
        }
    }

    #[test]
    fn tiktok_video_and_short_link() {
        let info = classify("https://www.tiktok.com/@some.creator/video/7234567890123456789?lang=en");
        assert_eq!(info.platform, Some(VideoPlatform::Tiktok));
        assert_eq!(info.video_id.as_deref(), Some("7234567890123456789"));

        let short = classify("https://vm.tiktok.com/ZMabc123/");
        assert!(short.is_video);
        assert_eq!(short.platform, Some(VideoPlatform::Tiktok));
        assert!(short.video_id.is_none());
        assert!(short.embed_url.is_none());

        assert!(!is_video_url("https://www.tiktok.com/@some.creator"));
    }

    #[test]
    fn instagram_posts_and_reels() {
        let reel = classify("https://www.instagram.com/reel/CxYz_12-ab/");
        assert_eq!(reel.platform, Some(VideoPlatform::Instagram));
        assert_eq!(reel.video_id.as_deref(), Some("CxYz_12-ab"));
        assert_eq!(
            reel.embed_url.as_deref(),
            Some("https://www.instagram.com/p/CxYz_12-ab/embed")
        );
        assert!(is_video_url("https://instagram.com/p/B1234/"));
        assert!(!is_video_url("https://instagram.com/some_profile"));
    }

    #[test]
    fn lookalike_hosts_are_rejected() {
        assert!(!is_video_url("https://notyoutube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!is_video_url("https://example.com/?next=https://youtu.be/dQw4w9WgXcQ"));
    }

    #[test]
    fn malformed_input_is_not_a_video() {
        for url in ["not a url", "", "   ", "https://", "://youtu.be/", "https://example.com/video/1"] {
            assert_eq!(classify(url), VideoInfo::not_video(), "{url:?}");
        }
    }

    #[test]
    fn priority_order_is_fixed() {
        assert_eq!(
            PLATFORM_PRIORITY,
            [
                VideoPlatform::Youtube,
                VideoPlatform::Vimeo,
                VideoPlatform::Tiktok,
                VideoPlatform::Instagram
            ]
        );
    }

    #[test]
    fn not_video_serializes_to_single_flag() {
        let json = serde_json::to_value(classify("not a url")).unwrap();
        assert_eq!(json, serde_json::json!({"isVideo": false}));
    }
}
