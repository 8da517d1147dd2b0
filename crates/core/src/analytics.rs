//! Event metadata attached by hosts to link click and view events.
//!
//! The engine only describes the link; sending the event belongs to the
//! analytics collaborator.

use serde::Serialize;
use ts_rs::TS;

use crate::content::Link;
use crate::video::{self, VideoInfo, VideoPlatform};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LinkEventMetadata {
    pub link_id: String,
    pub is_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub platform: Option<VideoPlatform>,
}

/// Classify the link and describe it for an analytics event.
pub fn link_event_metadata(link: &Link) -> LinkEventMetadata {
    metadata_from_video(&link.id, &video::classify(&link.url))
}

/// Build event metadata from an existing classification.
pub fn metadata_from_video(link_id: &str, info: &VideoInfo) -> LinkEventMetadata {
    LinkEventMetadata {
        link_id: link_id.to_string(),
        is_video: info.is_video,
        platform: info.platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str) -> Link {
        Link {
            id: "l9".into(),
            title: "Watch".into(),
            url: url.into(),
            is_active: true,
            order: 0,
            image: None,
        }
    }

    #[test]
    fn video_link_metadata() {
        let meta = link_event_metadata(&link("https://vimeo.com/76979871"));
        assert_eq!(meta.link_id, "l9");
        assert!(meta.is_video);
        assert_eq!(meta.platform, Some(VideoPlatform::Vimeo));
    }

    #[test]
    fn plain_link_metadata_omits_platform() {
        let meta = link_event_metadata(&link("https://shop.example.com"));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({"linkId": "l9", "isVideo": false}));
    }
}
