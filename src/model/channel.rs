use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// How the player resolves a channel's stream.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolType {
    /// The stream url is played as-is, no token or lookup needed.
    #[default]
    Direct,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Channel {
    pub id: u32,
    pub title: String,
    pub alias: String,
    pub stream_urls: Vec<String>,
    pub category: String,
    pub protocol: ProtocolType,
    pub requires_token: bool,
    pub token_mandatory: bool,
}

impl Channel {
    /// A channel imported from a playlist entry.
    pub fn new_direct(
        id: u32,
        title: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id,
            alias: title.clone(),
            title,
            stream_urls: vec![url.into()],
            category: category.into(),
            protocol: ProtocolType::Direct,
            requires_token: false,
            token_mandatory: false,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.stream_urls.first().map(|s| s.as_str())
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.title,
            self.category,
            self.url().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn direct_channel_fields() {
        let channel = Channel::new_direct(10000, "CNN", "http://x/cnn", "News");
        assert_eq!(channel.alias, "CNN");
        assert_eq!(channel.stream_urls, vec!["http://x/cnn".to_string()]);
        assert_eq!(channel.protocol, ProtocolType::Direct);
        assert!(!channel.requires_token && !channel.token_mandatory);
        assert_eq!(channel.to_string(), "CNN [News] http://x/cnn");
    }

    #[test]
    fn json_shape() {
        let channel = Channel::new_direct(1, "a", "b", "c");
        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["protocol"], "direct");
        assert_eq!(json["stream_urls"][0], "b");
        let back: Channel = serde_json::from_value(json).unwrap();
        assert_eq!(back, channel);
    }
}
