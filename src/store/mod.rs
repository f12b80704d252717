//! In-memory store for the loaded archive.
//!
//! Holds the team manifest and the loaded channel and user lists. The lists are
//! replaced wholesale once loading finishes and only read afterwards.

use crate::models::{Channel, Team, User};

/// Loaded archive state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    team: Team,
    channels: Vec<Channel>,
    users: Vec<User>,
}

impl Store {
    /// Create a store for the given manifest with no channels or users loaded.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            channels: Vec::new(),
            users: Vec::new(),
        }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Replace the channel list.
    pub fn set_channels(&mut self, channels: Vec<Channel>) {
        warn_duplicates("channel", channels.iter().map(Channel::id));
        self.channels = channels;
    }

    /// Replace the user list.
    pub fn set_users(&mut self, users: Vec<User>) {
        warn_duplicates("user", users.iter().map(|u| u.id.as_str()));
        self.users = users;
    }

    /// First channel with the given id.
    pub fn get_channel_by_id(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id() == id)
    }

    /// First user with the given id.
    pub fn get_user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// Duplicates stay in the list; lookups resolve to the first occurrence.
fn warn_duplicates<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            tracing::warn!("Duplicate {} id {}; lookups resolve to the first record", kind, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn channel(id: &str, name: &str) -> Channel {
        Channel::from_value(json!({ "id": id, "name": name })).unwrap()
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            real_name: name.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let team = Team {
            channels: vec!["general".to_string()],
            users: vec!["U1".to_string()],
        };
        let store = Store::new(team.clone());

        assert_eq!(store.team(), &team);
        assert!(store.channels().is_empty());
        assert!(store.users().is_empty());
        assert!(store.get_channel_by_id("general").is_none());
        assert!(store.get_user_by_id("U1").is_none());
    }

    #[test]
    fn test_get_channel_by_id() {
        let mut store = Store::default();
        store.set_channels(vec![channel("general", "general"), channel("random", "random")]);

        assert_eq!(store.get_channel_by_id("random").unwrap().name(), "random");
        assert!(store.get_channel_by_id("missing").is_none());
    }

    #[test]
    fn test_set_channels_replaces_wholesale() {
        let mut store = Store::default();
        store.set_channels(vec![channel("general", "general")]);
        store.set_channels(vec![channel("random", "random")]);

        assert_eq!(store.channels().len(), 1);
        assert!(store.get_channel_by_id("general").is_none());
        assert!(store.get_channel_by_id("random").is_some());
    }

    #[test]
    fn test_set_users_is_idempotent() {
        let users = vec![user("U1", "Ada"), user("BOT1", "Reminder Bot")];
        let mut store = Store::default();

        store.set_users(users.clone());
        let first = store.get_user_by_id("U1").cloned();
        store.set_users(users);
        let second = store.get_user_by_id("U1").cloned();

        assert_eq!(first, second);
        assert_eq!(first.unwrap().real_name, "Ada");
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut store = Store::default();
        store.set_users(vec![user("U1", "First"), user("U1", "Second")]);

        assert_eq!(store.users().len(), 2);
        assert_eq!(store.get_user_by_id("U1").unwrap().real_name, "First");
    }
}
