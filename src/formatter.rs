use crate::data_models::{ProductSpec, ReplyFormat, ResultItem};
use crate::fallback::Degradation;
use crate::replies::{Button, ButtonsContent, CardContent, Reply};

pub const BUTTONS_TITLE: &str = "Here is what I found:";

/// Caps `items` at `max` entries, keeping upstream order. A non-positive `max`
/// yields an empty slice.
pub fn truncate<T>(items: &[T], max: i64) -> &[T] {
    let keep = usize::try_from(max).unwrap_or(0).min(items.len());
    &items[..keep]
}

/// Turns a product's truncated results into a chat reply.
#[derive(Debug, Clone)]
pub struct ReplyFormatter {
    base_url: String,
}

impl ReplyFormatter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns `None` when the shape needs a first result and there is none.
    pub fn format(&self, format: &ReplyFormat, results: &[ResultItem], product: &ProductSpec) -> Option<Reply> {
        match format {
            ReplyFormat::Text => results.first().map(|r| Reply::text(r.url.clone())),
            ReplyFormat::Buttons => Some(Reply::Buttons {
                content: ButtonsContent {
                    title: BUTTONS_TITLE.to_string(),
                    buttons: results.iter().map(|r| self.link(r)).collect(),
                },
            }),
            ReplyFormat::Card => results.first().map(|r| Reply::Card { content: self.card(r) }),
            ReplyFormat::Carousel => Some(Reply::Carousel {
                content: results.iter().map(|r| self.card(r)).collect(),
            }),
            ReplyFormat::Unsupported(raw) => {
                log::warn!(
                    "reply type {raw:?} is not supported, answering product {} with fallback",
                    product.name
                );
                Some(Degradation::UnsupportedReplyType.reply())
            }
        }
    }

    fn link(&self, item: &ResultItem) -> Button {
        Button::web_url(item.title.clone(), format!("{}{}", self.base_url, item.url))
    }

    fn card(&self, item: &ResultItem) -> CardContent {
        CardContent {
            title: item.title.clone(),
            subtitle: item.description.clone(),
            image_url: String::new(),
            buttons: vec![self.link(item)],
        }
    }
}
