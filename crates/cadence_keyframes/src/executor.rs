//! The boundary between timelines and whatever actually animates them

use std::fmt;

use crate::options::KeyframeOptions;
use crate::segment::Effect;

/// Called once when an executor is done with a request
///
/// The flag is `true` when the animation ran to its end and `false` when it
/// was cancelled or rejected.
pub type Completion = Box<dyn FnOnce(bool) + Send>;

/// A keyframe expressed as fractions of the timeline's total duration
///
/// Fractions are expected in `0.0..=1.0` but are not clamped.
#[derive(Clone)]
pub struct RelativeKeyframe {
    pub relative_start: f64,
    pub relative_duration: f64,
    pub effect: Effect,
}

impl fmt::Debug for RelativeKeyframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelativeKeyframe")
            .field("relative_start", &self.relative_start)
            .field("relative_duration", &self.relative_duration)
            .finish_non_exhaustive()
    }
}

/// Everything an executor needs to run one timeline
pub struct KeyframeRequest {
    pub duration: f64,
    pub delay: f64,
    pub options: KeyframeOptions,
    /// Keyframes in registration order
    pub keyframes: Vec<RelativeKeyframe>,
    pub completion: Option<Completion>,
}

impl KeyframeRequest {
    /// Invoke the completion callback, if any
    pub fn complete(&mut self, finished: bool) {
        if let Some(completion) = self.completion.take() {
            completion(finished);
        }
    }
}

impl fmt::Debug for KeyframeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeRequest")
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("options", &self.options)
            .field("keyframes", &self.keyframes)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

/// Runs resolved timelines
///
/// Implementations own scheduling, interpolation and the completion
/// callback; a timeline only hands over its resolved keyframes.
pub trait KeyframeExecutor {
    /// Returned to the caller of [`Timeline::run`](crate::Timeline::run)
    type Handle;

    fn execute(&mut self, request: KeyframeRequest) -> Self::Handle;
}

impl<E: KeyframeExecutor + ?Sized> KeyframeExecutor for &mut E {
    type Handle = E::Handle;

    fn execute(&mut self, request: KeyframeRequest) -> Self::Handle {
        (**self).execute(request)
    }
}

/// Executor that stores requests instead of running them
///
/// Useful for inspecting what a timeline hands to a host, and for tests.
/// Completions are kept with their request and never invoked.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    requests: Vec<KeyframeRequest>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[KeyframeRequest] {
        &self.requests
    }

    /// Remove and return every recorded request
    pub fn take(&mut self) -> Vec<KeyframeRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl KeyframeExecutor for RecordingExecutor {
    /// Index of the recorded request
    type Handle = usize;

    fn execute(&mut self, request: KeyframeRequest) -> usize {
        self.requests.push(request);
        self.requests.len() - 1
    }
}
