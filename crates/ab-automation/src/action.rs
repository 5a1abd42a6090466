//! Action types
//!
//! An action is a service call performed when the automation fires. Home
//! Assistant accepts either a `target` block or inline `data`, so both are
//! optional and omitted from the YAML when unset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A service call action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Full service identifier, "<domain>.<service>" (e.g. "light.turn_on")
    pub service: String,

    /// Entities the service applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    /// Service data (e.g. a notification message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, serde_yaml::Value>>,
}

impl Action {
    /// Service call targeting a single entity
    pub fn for_entity(service: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            target: Some(Target {
                entity_id: entity_id.into(),
            }),
            data: None,
        }
    }

    /// Notification-style service call carrying a `message` in its data
    pub fn with_message(service: impl Into<String>, message: impl Into<String>) -> Self {
        let mut data = BTreeMap::new();
        data.insert(
            "message".to_string(),
            serde_yaml::Value::String(message.into()),
        );
        Self {
            service: service.into(),
            target: None,
            data: Some(data),
        }
    }

    /// The `message` entry from the action data, if present
    pub fn message(&self) -> Option<&str> {
        self.data.as_ref()?.get("message")?.as_str()
    }
}

/// Target block of a service call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub entity_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_action_omits_data() {
        let action = Action::for_entity("light.turn_on", "light.living_room");
        let yaml = serde_yaml::to_string(&action).unwrap();
        assert!(yaml.contains("service: light.turn_on"));
        assert!(yaml.contains("entity_id: light.living_room"));
        assert!(!yaml.contains("data:"));
    }

    #[test]
    fn message_action_omits_target() {
        let action = Action::with_message("notify.notify", "hello");
        assert_eq!(action.message(), Some("hello"));
        let yaml = serde_yaml::to_string(&action).unwrap();
        assert!(yaml.contains("message: hello"));
        assert!(!yaml.contains("target:"));
    }
}
