//! Options passed through to keyframe executors
//!
//! Timelines never inspect these; they travel unchanged to whichever
//! executor runs the animation.

use serde::{Deserialize, Serialize};

/// How an executor should move between keyframes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    #[default]
    Linear,
    Discrete,
    Paced,
    Cubic,
    CubicPaced,
}

/// Executor configuration carried by a timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyframeOptions {
    /// Keep the animated surface interactive while running
    pub allow_user_interaction: bool,
    /// Start from the presentation state of any in-flight animation
    pub begin_from_current_state: bool,
    /// Restart the animation each time it reaches the end
    pub repeat: bool,
    /// Play backwards after each forward pass
    pub autoreverse: bool,
    pub calculation_mode: CalculationMode,
}

impl KeyframeOptions {
    /// Builder: allow user interaction
    pub fn with_user_interaction(mut self) -> Self {
        self.allow_user_interaction = true;
        self
    }

    /// Builder: begin from current state
    pub fn with_begin_from_current_state(mut self) -> Self {
        self.begin_from_current_state = true;
        self
    }

    /// Builder: repeat indefinitely
    pub fn with_repeat(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Builder: autoreverse each pass
    pub fn with_autoreverse(mut self) -> Self {
        self.autoreverse = true;
        self
    }

    /// Builder: set calculation mode
    pub fn with_calculation_mode(mut self, mode: CalculationMode) -> Self {
        self.calculation_mode = mode;
        self
    }
}
