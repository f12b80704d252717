//! Channel record model.
//!
//! Channels are passthrough payloads: only the identifier is modeled, every other
//! attribute of the exported record is kept verbatim.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// A channel transcript as found in the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    id: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Channel {
    /// Parse a raw channel record. The record must be an object with a string `id`.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let Value::Object(mut attributes) = value else {
            return Err(AppError::MalformedRecord(
                "Channel record is not a JSON object".to_string(),
            ));
        };

        let id = match attributes.remove("id") {
            Some(Value::String(id)) => id,
            _ => {
                return Err(AppError::MalformedRecord(
                    "Channel record has no string id".to_string(),
                ))
            }
        };

        Ok(Self { id, attributes })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Channel name, falling back to the identifier.
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }

    /// Channel topic. Exports store it either as `{ "value": ... }` or as a plain string.
    pub fn topic(&self) -> Option<&str> {
        let topic = match self.attributes.get("topic")? {
            Value::Object(topic) => topic.get("value")?.as_str()?,
            Value::String(topic) => topic.as_str(),
            _ => return None,
        };
        (!topic.is_empty()).then_some(topic)
    }

    /// Distinct user ids that authored messages, in first-seen order.
    pub fn message_authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = Vec::new();
        let messages = self
            .attributes
            .get("messages")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for user in messages
            .iter()
            .filter_map(|m| m.get("user").and_then(Value::as_str))
        {
            if !authors.contains(&user) {
                authors.push(user);
            }
        }
        authors
    }

    pub fn summary(&self) -> ChannelSummary {
        ChannelSummary {
            id: self.id.clone(),
            name: self.name().to_string(),
            topic: self.topic().map(str::to_string),
        }
    }
}

/// Compact channel entry used by the channel list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}
