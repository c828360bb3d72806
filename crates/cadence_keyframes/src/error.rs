use thiserror::Error;

/// Reasons a [`KeyframeScheduler`](crate::KeyframeScheduler) refuses a request
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScheduleError {
    #[error("animation duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("animation delay must be non-negative and finite, got {0}")]
    InvalidDelay(f64),

    #[error("keyframe {index} has a non-finite fraction (start {relative_start}, duration {relative_duration})")]
    NonFiniteKeyframe {
        index: usize,
        relative_start: f64,
        relative_duration: f64,
    },
}
