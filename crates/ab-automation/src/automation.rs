//! The Automation structure
//!
//! Field declaration order matters: `serde_yaml` emits keys in that order,
//! and the rendered YAML is what gets pushed to Home Assistant (alias,
//! description, trigger, condition, action, mode).

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::trigger::Trigger;

/// A Home Assistant automation definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    /// Human-readable label
    pub alias: String,

    /// Provenance note ("Generated from: <description>")
    pub description: String,

    /// Triggers that start the automation; never empty
    pub trigger: Vec<Trigger>,

    /// Conditions gating the actions; kept as raw YAML values since the
    /// generators never emit any
    #[serde(default)]
    pub condition: Vec<serde_yaml::Value>,

    /// Actions to run; never empty
    pub action: Vec<Action>,

    /// Execution mode
    #[serde(default)]
    pub mode: Mode,
}

impl Automation {
    /// Render to block-style YAML, keys in declaration order
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Derive the config filename used when persisting to Home Assistant:
    /// lowercase alias, spaces as underscores, truncated to 40 characters,
    /// with a `.yaml` suffix appended when absent.
    pub fn config_filename(&self) -> String {
        let mut name: String = self
            .alias
            .to_lowercase()
            .replace(' ', "_")
            .chars()
            .take(40)
            .collect();
        if !name.ends_with(".yaml") {
            name.push_str(".yaml");
        }
        name
    }
}

/// Automation execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Default - ignore new triggers while running
    #[default]
    Single,

    /// Restart from beginning on new trigger
    Restart,

    /// Queue triggers while running
    Queued,

    /// Run all simultaneously
    Parallel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::SunEvent;
    use chrono::NaiveTime;

    fn sample() -> Automation {
        Automation {
            alias: "AI Generated: Turn on lights at sunset".to_string(),
            description: "Generated from: Turn on lights at sunset".to_string(),
            trigger: vec![Trigger::sun(SunEvent::Sunset, "0:00:00")],
            condition: Vec::new(),
            action: vec![Action::for_entity("light.turn_on", "light.living_room")],
            mode: Mode::Single,
        }
    }

    #[test]
    fn yaml_round_trip_preserves_structure() {
        let automation = sample();
        let yaml = automation.to_yaml().unwrap();
        let parsed: Automation = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, automation);
    }

    #[test]
    fn yaml_keys_in_declaration_order() {
        let yaml = sample().to_yaml().unwrap();
        let alias = yaml.find("alias:").unwrap();
        let description = yaml.find("description:").unwrap();
        let trigger = yaml.find("trigger:").unwrap();
        let condition = yaml.find("condition:").unwrap();
        let action = yaml.find("action:").unwrap();
        let mode = yaml.find("mode:").unwrap();
        assert!(alias < description);
        assert!(description < trigger);
        assert!(trigger < condition);
        assert!(condition < action);
        assert!(action < mode);
    }

    #[test]
    fn config_filename_lowercases_and_suffixes() {
        let automation = sample();
        assert_eq!(
            automation.config_filename(),
            "ai_generated:_turn_on_lights_at_sunset.yaml"
        );
    }

    #[test]
    fn config_filename_truncates_to_forty_chars() {
        let mut automation = sample();
        automation.alias = "A".repeat(80);
        let filename = automation.config_filename();
        assert_eq!(filename.len(), 45);
        assert!(filename.ends_with(".yaml"));
        assert!(filename.starts_with(&"a".repeat(40)));
    }

    #[test]
    fn round_trip_with_time_trigger_and_message_action() {
        let automation = Automation {
            alias: "AI Generated: ".to_string(),
            description: "Generated from: ".to_string(),
            trigger: vec![Trigger::at(NaiveTime::from_hms_opt(12, 0, 0).unwrap())],
            condition: Vec::new(),
            action: vec![Action::with_message("notify.notify", "Automation triggered: ")],
            mode: Mode::Single,
        };
        let yaml = automation.to_yaml().unwrap();
        let parsed: Automation = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, automation);
    }
}
