use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Reply shape requested by the chat bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyFormat {
    Text,
    Buttons,
    Card,
    Carousel,
    /// Any other wire value, kept verbatim so it can be logged.
    Unsupported(String),
}

impl ReplyFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ReplyFormat::Text => "text",
            ReplyFormat::Buttons => "buttons",
            ReplyFormat::Card => "card",
            ReplyFormat::Carousel => "carousel",
            ReplyFormat::Unsupported(raw) => raw,
        }
    }
}

impl From<&str> for ReplyFormat {
    fn from(raw: &str) -> Self {
        match raw {
            "text" => ReplyFormat::Text,
            "buttons" => ReplyFormat::Buttons,
            "card" => ReplyFormat::Card,
            "carousel" => ReplyFormat::Carousel,
            other => ReplyFormat::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for ReplyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReplyFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReplyFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| ReplyFormat::from(r.as_str())).unwrap_or_default())
    }
}

impl Default for ReplyFormat {
    fn default() -> Self {
        ReplyFormat::Unsupported(String::new())
    }
}

/// One documentation collection to search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_results: i64,
}

impl ProductSpec {
    pub fn new(name: impl Into<String>, version: impl Into<String>, max_results: i64) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            max_results,
        }
    }
}

/// Inbound chat-bot request.
///
/// ```json
/// {
///   "response_type": "carousel",
///   "products": [{ "name": "PRODUCT", "version": "VERSION", "max_results": 10 }],
///   "conversation": { "memory": { "query": "{{memory.query}}" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, rename = "response_type")]
    pub reply_format: ReplyFormat,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<ProductSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversation: Conversation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SearchRequest {
    pub fn new(reply_format: ReplyFormat, products: Vec<ProductSpec>, query: impl Into<String>) -> Self {
        Self {
            reply_format,
            products,
            conversation: Conversation {
                memory: Memory {
                    query: query.into(),
                },
            },
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn query(&self) -> &str {
        &self.conversation.memory.query
    }

    /// Requested language, or `fallback` when the request names none.
    pub fn language_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory: Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
}

/// Envelope returned by the documentation search API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: UpstreamData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_results: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ResultItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_results: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<ResultItem>,
}

/// A single hit. Only `title`, `description` and `url` feed the replies; the
/// rest is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transtype: String,
}

impl ResultItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Results of one upstream call, stripped of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub query: String,
    pub results: Vec<ResultItem>,
}

impl From<UpstreamResponse> for SearchResult {
    fn from(response: UpstreamResponse) -> Self {
        SearchResult {
            query: response.data.query,
            results: response.data.results,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
