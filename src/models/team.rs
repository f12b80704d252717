//! Team manifest model.

use serde::{Deserialize, Serialize};

/// The manifest listing every channel and user of the exported workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_default_to_empty() {
        let team: Team = serde_json::from_str(r#"{"channels":["general"]}"#).unwrap();
        assert_eq!(team.channels, vec!["general".to_string()]);
        assert!(team.users.is_empty());
    }
}
