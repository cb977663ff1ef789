use serde::{Deserialize, Serialize};

pub const WEB_URL_BUTTON: &str = "web_url";

/// A chat message in one of the shapes the bot platform renders.
///
/// Serialized with a `type` discriminator next to the `content` payload:
///
/// ```json
/// { "type": "card", "content": { "title": "...", "buttons": [ ... ] } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "is_zero")]
        delay: u32,
    },
    Buttons {
        content: ButtonsContent,
    },
    Card {
        content: CardContent,
    },
    Carousel {
        content: Vec<CardContent>,
    },
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text {
            content: content.into(),
            delay: 0,
        }
    }

    /// Wire discriminator of this reply.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Text { .. } => "text",
            Reply::Buttons { .. } => "buttons",
            Reply::Card { .. } => "card",
            Reply::Carousel { .. } => "carousel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Button {
    pub fn web_url(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: WEB_URL_BUTTON.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonsContent {
    pub title: String,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    pub buttons: Vec<Button>,
}

/// Ordered replies for one request, in product order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBatch {
    pub replies: Vec<Reply>,
}

impl ReplyBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reply> {
        self.replies.iter()
    }
}

impl IntoIterator for ReplyBatch {
    type Item = Reply;
    type IntoIter = std::vec::IntoIter<Reply>;

    fn into_iter(self) -> Self::IntoIter {
        self.replies.into_iter()
    }
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}
