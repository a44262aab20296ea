use serde::{Deserialize, Serialize};

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/live_stream";

/// Live-stream embed for the configured video channel.
/// A missing channel id is the idle state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveStream {
    pub channel_id: Option<String>,
}

impl LiveStream {
    pub fn new(channel_id: Option<String>) -> Self {
        Self {
            channel_id: channel_id.filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.channel_id.is_some()
    }

    pub fn embed_url(&self) -> Option<String> {
        self.channel_id.as_ref().map(|id| {
            format!(
                "{}?channel={}",
                EMBED_BASE_URL,
                urlencoding::encode(id.trim())
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url_for_channel() {
        let live = LiveStream::new(Some("UC123abc".to_string()));
        assert!(live.is_configured());
        assert_eq!(
            live.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/live_stream?channel=UC123abc")
        );
    }

    #[test]
    fn test_blank_channel_is_idle() {
        assert!(!LiveStream::new(None).is_configured());
        assert!(!LiveStream::new(Some("  ".to_string())).is_configured());
        assert_eq!(LiveStream::new(None).embed_url(), None);
    }
}
