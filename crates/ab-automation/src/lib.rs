//! Automation data model for the AI Automation Builder
//!
//! Defines the `Automation` structure produced by the generators and the
//! trigger/action types it is built from, matching the YAML shape that
//! Home Assistant expects for `automation:` config entries.

mod action;
mod automation;
mod trigger;

pub use action::{Action, Target};
pub use automation::{Automation, Mode};
pub use trigger::{StateTrigger, SunEvent, SunTrigger, TimeTrigger, Trigger};
