//! Cadence Keyframes
//!
//! Declarative, immutable keyframe timelines.
//!
//! # Features
//!
//! - **Timelines**: Chain timed effects against a total duration; every append returns a new value
//! - **Slicing**: Subdivide one keyframe window into several effects at finer offsets
//! - **Normalization**: Segments resolve to fractions of the total duration at run time
//! - **Executors**: Hand resolved keyframes to a host animation engine, or to the bundled frame-driven scheduler

pub mod error;
pub mod executor;
pub mod options;
pub mod scheduler;
pub mod segment;
pub mod slice;
pub mod timeline;

pub use error::ScheduleError;
pub use executor::{
    Completion, KeyframeExecutor, KeyframeRequest, RecordingExecutor, RelativeKeyframe,
};
pub use options::{CalculationMode, KeyframeOptions};
pub use scheduler::{AnimationId, KeyframeScheduler};
pub use segment::{Effect, Segment, Window};
pub use slice::SliceBuilder;
pub use timeline::Timeline;
