//! Base automation template
//!
//! Every generated automation starts from this skeleton: a noon time
//! trigger and a broadcast notification. The keyword rules then replace
//! trigger and/or action when the description matches.

use ab_automation::{Action, Automation, Mode, Trigger};
use chrono::NaiveTime;

/// Maximum number of description characters carried into the alias
const ALIAS_DESCRIPTION_LIMIT: usize = 50;

/// Build the default automation skeleton for a description.
///
/// Total over all inputs, including the empty string.
pub fn base_automation(description: &str) -> Automation {
    Automation {
        alias: alias_for(description),
        description: format!("Generated from: {description}"),
        trigger: vec![Trigger::at(noon())],
        condition: Vec::new(),
        action: vec![Action::with_message(
            "notify.notify",
            format!("Automation triggered: {description}"),
        )],
        mode: Mode::Single,
    }
}

/// Derive the display label: "AI Generated: " plus the description,
/// truncated to 50 characters with a trailing ellipsis when cut short.
pub(crate) fn alias_for(description: &str) -> String {
    if description.chars().count() > ALIAS_DESCRIPTION_LIMIT {
        let truncated: String = description.chars().take(ALIAS_DESCRIPTION_LIMIT).collect();
        format!("AI Generated: {truncated}...")
    } else {
        format!("AI Generated: {description}")
    }
}

fn noon() -> NaiveTime {
    // 12:00:00 is always a valid wall-clock time
    NaiveTime::from_hms_opt(12, 0, 0).expect("valid time")
}
