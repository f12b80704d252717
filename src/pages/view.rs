//! View model handed to the channel view.

use serde::Serialize;

use super::Page;
use crate::errors::AppError;
use crate::models::{Channel, ChannelSummary, User};
use crate::store::Store;

/// Everything the channel view renders for one page.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelView {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub channels: Vec<ChannelSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Channel>,
    /// Known authors of the selected channel's messages
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<User>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ChannelView {
    pub fn build(store: &Store, page: &Page, warnings: Vec<String>) -> Result<Self, AppError> {
        let channels: Vec<ChannelSummary> =
            store.channels().iter().map(Channel::summary).collect();

        let (channel, selected, authors) = match page {
            Page::Channel => (None, None, Vec::new()),
            Page::ChannelPage { channel } => {
                let selected = store
                    .get_channel_by_id(channel)
                    .ok_or_else(|| AppError::NotFound(format!("Channel {} not found", channel)))?;
                let authors: Vec<User> = selected
                    .message_authors()
                    .into_iter()
                    .filter_map(|id| store.get_user_by_id(id).cloned())
                    .collect();
                (Some(channel.clone()), Some(selected.clone()), authors)
            }
        };

        Ok(Self {
            page: page.name(),
            channel,
            channels,
            selected,
            authors,
            warnings,
        })
    }
}
