//! Compatibility tests: the model must accept and reproduce the exact
//! YAML/JSON shapes Home Assistant uses for automation config entries.

use ab_automation::{Action, Automation, Mode, SunEvent, Trigger};
use serde_json::json;

#[test]
fn parses_ha_format_automation_yaml() {
    let yaml = r#"
alias: "AI Generated: Turn on lights at sunset"
description: "Generated from: Turn on lights at sunset"
trigger:
  - platform: sun
    event: sunset
    offset: "0:00:00"
condition: []
action:
  - service: light.turn_on
    target:
      entity_id: light.living_room
mode: single
"#;

    let automation: Automation = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(automation.alias, "AI Generated: Turn on lights at sunset");
    assert_eq!(
        automation.trigger,
        vec![Trigger::sun(SunEvent::Sunset, "0:00:00")]
    );
    assert!(automation.condition.is_empty());
    assert_eq!(
        automation.action,
        vec![Action::for_entity("light.turn_on", "light.living_room")]
    );
    assert_eq!(automation.mode, Mode::Single);
}

#[test]
fn parses_automation_from_api_json() {
    // shape the web UI posts back to /api/save
    let automation: Automation = serde_json::from_value(json!({
        "alias": "AI Generated: ",
        "description": "Generated from: ",
        "trigger": [{ "platform": "time", "at": "12:00:00" }],
        "condition": [],
        "action": [{
            "service": "notify.notify",
            "data": { "message": "Automation triggered: " }
        }],
        "mode": "single"
    }))
    .unwrap();

    assert_eq!(automation.action[0].message(), Some("Automation triggered: "));
    assert!(matches!(automation.trigger[0], Trigger::Time(_)));
}

#[test]
fn missing_condition_and_mode_default() {
    let yaml = r#"
alias: minimal
description: minimal
trigger:
  - platform: time
    at: "06:30:00"
action:
  - service: notify.notify
    data:
      message: hi
"#;

    let automation: Automation = serde_yaml::from_str(yaml).unwrap();
    assert!(automation.condition.is_empty());
    assert_eq!(automation.mode, Mode::Single);
}

#[test]
fn rendered_yaml_parses_back_identically() {
    let automation: Automation = serde_json::from_value(json!({
        "alias": "AI Generated: door watch",
        "description": "Generated from: door watch",
        "trigger": [{
            "platform": "state",
            "entity_id": "binary_sensor.door_sensor",
            "to": "on"
        }],
        "condition": [],
        "action": [{
            "service": "notify.mobile_app",
            "data": { "message": "door watch" }
        }],
        "mode": "single"
    }))
    .unwrap();

    let yaml = automation.to_yaml().unwrap();
    let reparsed: Automation = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(reparsed, automation);
}
