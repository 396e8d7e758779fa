use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A message exchanged with a peer.
///
/// Inbound messages come from `recv`; outbound replies are passed to `send`.
/// When `score` is `None` the key is left out of the request body entirely
/// (the server distinguishes "no score" from `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Counterpart the message is from / addressed to. Never empty.
    #[serde(deserialize_with = "non_empty_string")]
    pub peer_id: String,
    /// Message text
    pub message: String,
    /// Relevance score in `[0.0, 1.0]` by server convention (not enforced here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Message {
    /// Create an unscored message.
    pub fn new(peer_id: impl Into<String>, message: impl Into<String>) -> Self {
        Message {
            peer_id: peer_id.into(),
            message: message.into(),
            score: None,
        }
    }

    /// Build a reply to this message carrying `text`.
    pub fn reply(&self, text: impl Into<String>) -> Self {
        Message::new(self.peer_id.clone(), text)
    }

    /// Attach a score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Delivery acknowledgment for one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Peer the reply was addressed to
    pub peer_id: String,
    /// Whether the server accepted the reply
    pub success: bool,
}

/// Index statuses by peer.
///
/// The server does not promise to answer in request order, so replies must
/// be matched to their status by `peer_id`.
pub fn statuses_by_peer(statuses: &[Status]) -> HashMap<&str, bool> {
    statuses
        .iter()
        .map(|s| (s.peer_id.as_str(), s.success))
        .collect()
}

/// Clamp a score into `[0.0, 1.0]`. NaN maps to `0.0`.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(serde::de::Error::custom("peer_id must not be empty"));
    }
    Ok(value)
}
