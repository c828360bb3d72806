//! Timed segments and the windows they are sliced from

use std::fmt;
use std::sync::Arc;

/// A zero-argument side effect run when a segment's time window is reached
pub type Effect = Arc<dyn Fn() + Send + Sync>;

/// One timed effect in a timeline
///
/// `start` is expressed in the owning timeline's coordinate space, in the
/// same unit as `duration`. Neither value is validated here.
#[derive(Clone)]
pub struct Segment {
    start: f64,
    duration: f64,
    effect: Effect,
}

impl Segment {
    pub fn new(start: f64, duration: f64, effect: impl Fn() + Send + Sync + 'static) -> Self {
        Self::from_effect(start, duration, Arc::new(effect))
    }

    /// Create a segment sharing an existing effect
    pub fn from_effect(start: f64, duration: f64, effect: Effect) -> Self {
        Self {
            start,
            duration,
            effect,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time at which the segment ends (`start + duration`)
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("start", &self.start)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// A parent time window that slices are positioned against
///
/// Windows carry no effect and so can never be handed to an executor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    /// Coordinate origin for every slice taken from this window
    pub start: f64,
    /// Informational only; slices are not checked against it
    pub duration: f64,
}

impl Window {
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }
}
