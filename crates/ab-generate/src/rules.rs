//! Keyword rule engine
//!
//! Refines the base skeleton with case-insensitive substring rules. Each
//! rule replaces the whole `trigger` or `action` list when it matches; all
//! rules are evaluated in table order, so within a field the last match
//! wins. Sensor-trigger rules sit after the time-trigger rules so that a
//! description like "notify me when motion is detected in the evening"
//! ends up with the motion trigger, not the sun trigger.

use ab_automation::{Action, Automation, SunEvent, Trigger};
use chrono::NaiveTime;

use crate::template::base_automation;

/// A single keyword rule: matches when at least one `any_of` keyword and
/// every `requires` keyword appear in the lowercased description.
struct Rule {
    any_of: &'static [&'static str],
    requires: &'static [&'static str],
    effect: Effect,
}

/// What a matching rule replaces. The constructors receive the original
/// (not lowercased) description for actions that embed it.
enum Effect {
    SetTrigger(fn() -> Trigger),
    SetAction(fn(&str) -> Action),
}

impl Rule {
    fn matches(&self, haystack: &str) -> bool {
        self.any_of.iter().any(|kw| haystack.contains(kw))
            && self.requires.iter().all(|kw| haystack.contains(kw))
    }
}

/// The authoritative rule table, in evaluation order: time triggers first,
/// then sensor triggers, then actions.
static RULES: &[Rule] = &[
    Rule {
        any_of: &["sunset", "dusk"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::sun(SunEvent::Sunset, "0:00:00")),
    },
    Rule {
        any_of: &["sunrise", "dawn"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::sun(SunEvent::Sunrise, "0:00:00")),
    },
    Rule {
        any_of: &["morning"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::sun(SunEvent::Sunrise, "0:30:00")),
    },
    Rule {
        any_of: &["evening"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::sun(SunEvent::Sunset, "0:00:00")),
    },
    Rule {
        any_of: &["midnight"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::at(time(0, 0, 0))),
    },
    Rule {
        any_of: &["noon"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::at(time(12, 0, 0))),
    },
    Rule {
        any_of: &["motion"],
        requires: &[],
        effect: Effect::SetTrigger(|| Trigger::state("binary_sensor.motion_sensor", "on")),
    },
    Rule {
        any_of: &["open", "opened"],
        requires: &["door"],
        effect: Effect::SetTrigger(|| Trigger::state("binary_sensor.door_sensor", "on")),
    },
    Rule {
        any_of: &["close", "closed"],
        requires: &["door"],
        effect: Effect::SetTrigger(|| Trigger::state("binary_sensor.door_sensor", "off")),
    },
    Rule {
        any_of: &["on"],
        requires: &["light"],
        effect: Effect::SetAction(|_| Action::for_entity("light.turn_on", "light.living_room")),
    },
    Rule {
        any_of: &["off"],
        requires: &["light"],
        effect: Effect::SetAction(|_| Action::for_entity("light.turn_off", "light.living_room")),
    },
    Rule {
        any_of: &["notification", "notify", "alert"],
        requires: &[],
        effect: Effect::SetAction(|description| {
            Action::with_message("notify.mobile_app", description)
        }),
    },
];

/// Apply the keyword rules on top of a base automation.
///
/// Never fails; an unmatched description returns the base unchanged.
pub fn apply_rules(description: &str, mut automation: Automation) -> Automation {
    let haystack = description.to_lowercase();
    for rule in RULES {
        if rule.matches(&haystack) {
            match rule.effect {
                Effect::SetTrigger(build) => automation.trigger = vec![build()],
                Effect::SetAction(build) => automation.action = vec![build(description)],
            }
        }
    }
    automation
}

/// The full deterministic generation path: skeleton plus keyword rules.
pub fn keyword_automation(description: &str) -> Automation {
    apply_rules(description, base_automation(description))
}

fn time(hour: u32, min: u32, sec: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, sec).expect("valid time")
}
