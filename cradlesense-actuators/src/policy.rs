//! Static actuator policy
//!
//! The classification-to-command mapping is a fixed table, not
//! configuration: it is part of the product's behavior.
//!
//! | classification       | commands              |
//! |----------------------|-----------------------|
//! | Wave                 | dance                 |
//! | Clap                 | led, sound, vibrate   |
//! | Pointing             | move                  |
//! | Abnormal (any kind)  | alert                 |
//! | None / Normal        | (nothing)             |

use serde_json::{json, Value};

use cradlesense_core::{GestureKind, HealthStatus};

/// A physical actuator action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Short dance routine on the drive motors
    Dance,
    /// Blink the LED
    Led,
    /// Play the acknowledgement sound
    Sound,
    /// Pulse the vibration motor
    Vibrate,
    /// Roll forward
    Move,
    /// Raise the safety alert
    Alert,
}

impl Action {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Dance => "dance",
            Action::Led => "led",
            Action::Sound => "sound",
            Action::Vibrate => "vibrate",
            Action::Move => "move",
            Action::Alert => "alert",
        }
    }

    /// Endpoint path under the hardware base address
    pub const fn path(&self) -> &'static str {
        match self {
            Action::Dance => "/motor/dance",
            Action::Led => "/led",
            Action::Sound => "/sound",
            Action::Vibrate => "/vibrate",
            Action::Move => "/motor/move",
            Action::Alert => "/alert",
        }
    }

    /// Command payload for this action
    pub fn payload(&self) -> Value {
        match self {
            Action::Dance => json!({ "duration": 1 }),
            Action::Led => json!({ "state": "on", "duration": 0.5 }),
            Action::Sound => json!({ "file": "correct.wav" }),
            Action::Vibrate => json!({ "duration": 0.5 }),
            Action::Move => json!({ "direction": "forward", "duration": 1 }),
            Action::Alert => json!({ "duration": 2 }),
        }
    }

    /// Full command for this action
    pub fn command(&self) -> Command {
        Command {
            action: *self,
            path: self.path(),
            payload: self.payload(),
        }
    }
}

/// A resolved outbound command
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// The action being commanded
    pub action: Action,
    /// Endpoint path under the hardware base address
    pub path: &'static str,
    /// JSON payload carried by the call
    pub payload: Value,
}

/// Actions triggered by a gesture classification
pub const fn for_gesture(kind: GestureKind) -> &'static [Action] {
    match kind {
        GestureKind::Wave => &[Action::Dance],
        GestureKind::Clap => &[Action::Led, Action::Sound, Action::Vibrate],
        GestureKind::Pointing => &[Action::Move],
        GestureKind::Abnormal => &[Action::Alert],
        GestureKind::None => &[],
    }
}

/// Actions triggered by a health status
pub const fn for_health(status: HealthStatus) -> &'static [Action] {
    match status {
        HealthStatus::Abnormal => &[Action::Alert],
        HealthStatus::Normal => &[],
    }
}
