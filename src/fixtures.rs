//! Export fixtures shared by the test modules.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::{Config, LoadPolicy};
use crate::loader::{self, DataSource, FsDataSource};
use crate::AppState;

/// A small export on disk: two channels, two members and a bot.
pub struct ExportFixture {
    dir: TempDir,
}

impl ExportFixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };

        fixture.write(
            "team.json",
            json!({ "channels": ["general", "random"], "users": ["U1", "U2", "BOT1"] }),
        );
        fixture.write(
            "channels/general.json",
            json!({
                "id": "general",
                "name": "general",
                "topic": { "value": "Company-wide announcements" },
                "messages": [
                    { "user": "U1", "text": "Hello everyone", "ts": "1500000000.000100" },
                    { "user": "BOT1", "text": "Reminder: standup", "ts": "1500000060.000200" },
                    { "user": "U999", "text": "Deactivated account", "ts": "1500000120.000300" },
                    { "user": "U1", "text": "Thanks", "ts": "1500000180.000400" }
                ]
            }),
        );
        fixture.write(
            "channels/random.json",
            json!({ "id": "random", "name": "random", "messages": [] }),
        );
        fixture.write(
            "users/U1.json",
            json!({ "id": "U1", "real_name": "Ada Lovelace", "profile": { "display_name": "ada" } }),
        );
        fixture.write(
            "users/U2.json",
            json!({ "id": "U2", "real_name": "Grace Hopper", "profile": { "display_name": "" } }),
        );
        fixture.write("users/BOT1.json", json!({ "id": "BOT1", "name": "Reminder Bot" }));

        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, value: Value) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(path, value.to_string()).expect("Failed to write fixture");
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.dir.path().join(relative)).expect("Failed to remove fixture");
    }

    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::new(FsDataSource::new(self.path()))
    }

    pub fn config(&self, load_policy: LoadPolicy) -> Config {
        Config {
            data_dir: self.path().to_path_buf(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            load_policy,
        }
    }

    /// App state with the manifest loaded and the status still `Loading`.
    pub async fn state(&self, load_policy: LoadPolicy) -> AppState {
        let team = loader::load_team(self.source().as_ref())
            .await
            .expect("Failed to load team manifest");
        AppState::new(team, self.config(load_policy))
    }
}
