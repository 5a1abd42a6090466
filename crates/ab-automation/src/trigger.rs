//! Trigger types
//!
//! Triggers are the event detectors that start an automation. Only the
//! platforms the generators can emit are modelled here: a fixed time of
//! day, a sun event with an offset, and an entity state change.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Trigger definition, tagged by platform as in Home Assistant YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires at a specific time of day
    Time(TimeTrigger),

    /// Fires at sunrise/sunset, optionally shifted by an offset
    Sun(SunTrigger),

    /// Fires when an entity reaches a target state
    State(StateTrigger),
}

impl Trigger {
    /// Time trigger at the given wall-clock time
    pub fn at(time: NaiveTime) -> Self {
        Trigger::Time(TimeTrigger { at: time })
    }

    /// Sun trigger with an `H:MM:SS` offset (signed, e.g. "-0:30:00")
    pub fn sun(event: SunEvent, offset: impl Into<String>) -> Self {
        Trigger::Sun(SunTrigger {
            event,
            offset: offset.into(),
        })
    }

    /// State trigger for `entity_id` reaching state `to`
    pub fn state(entity_id: impl Into<String>, to: impl Into<String>) -> Self {
        Trigger::State(StateTrigger {
            entity_id: entity_id.into(),
            to: to.into(),
        })
    }
}

/// Time trigger (serializes `at` as HH:MM:SS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTrigger {
    /// Time to trigger at
    pub at: NaiveTime,
}

/// Sun event trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTrigger {
    /// Which sun event to trigger on
    pub event: SunEvent,

    /// Signed offset from the event, as an `H:MM:SS` string
    pub offset: String,
}

/// Sunrise or sunset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

/// Entity state trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTrigger {
    /// Entity to watch (e.g. "binary_sensor.motion_sensor")
    pub entity_id: String,

    /// Target state that fires the trigger
    pub to: String,
}
