//! Fallback replies substituted when a product cannot be answered from
//! upstream results. There is no retry path: every failure becomes one of
//! these text messages inside an otherwise normal reply list.

use crate::error::SearchError;
use crate::replies::Reply;

pub const HICCUP_MESSAGE: &str = "Looks like there was a hiccup... please try again.";
pub const UNSUPPORTED_MESSAGE: &str = "Sorry, but this response type is not supported!";

/// Reasons a product's slot in the batch is filled with a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Upstream could not be reached, timed out, or answered with an error status.
    Transport,
    /// Upstream answered with a body that is not the expected JSON.
    Decode,
    /// Upstream answered fine but found nothing for the query.
    EmptyResult { query: String },
    /// The requested reply shape is not one the formatter knows.
    UnsupportedReplyType,
}

impl Degradation {
    pub fn reply(&self) -> Reply {
        match self {
            Degradation::Transport | Degradation::Decode => Reply::text(HICCUP_MESSAGE),
            Degradation::EmptyResult { query } => Reply::text(empty_result_message(query)),
            Degradation::UnsupportedReplyType => Reply::text(UNSUPPORTED_MESSAGE),
        }
    }

    /// Whether fail-fast aggregation abandons the remaining products.
    pub fn aborts_batch(&self) -> bool {
        !matches!(self, Degradation::UnsupportedReplyType)
    }
}

impl From<&SearchError> for Degradation {
    fn from(err: &SearchError) -> Self {
        match err {
            SearchError::Transport(_) => Degradation::Transport,
            SearchError::Decode(_) => Degradation::Decode,
        }
    }
}

pub fn empty_result_message(query: &str) -> String {
    format!("Sorry, but I couldn't find anything for '{query}'... try rewording your question!")
}
