//! Immutable keyframe timelines
//!
//! A [`Timeline`] is built by chaining appends, each of which returns a new
//! timeline and leaves the receiver untouched. [`Timeline::run`] normalizes
//! every segment against the total duration and hands the result to a
//! [`KeyframeExecutor`].

use smallvec::SmallVec;

use crate::executor::{Completion, KeyframeExecutor, KeyframeRequest, RelativeKeyframe};
use crate::options::KeyframeOptions;
use crate::segment::{Segment, Window};
use crate::slice::{Segments, SliceBuilder};

/// An ordered composition of timed segments
///
/// Segments keep their insertion order. Later segments take presentation
/// priority over earlier ones at equal timestamps.
///
/// # Example
///
/// ```rust
/// use cadence_keyframes::{RecordingExecutor, Timeline};
///
/// let timeline = Timeline::new(7.0)
///     .append(0.0, 1.0, || println!("fade in"))
///     .append_slices(5.0, 2.0, |window| {
///         window
///             .slice(0.0, 1.0, || println!("dim"))
///             .slice(1.0, 2.0, || println!("hide"))
///     });
///
/// let mut executor = RecordingExecutor::new();
/// timeline.run(&mut executor, None);
///
/// let keyframes = &executor.requests()[0].keyframes;
/// assert_eq!(keyframes.len(), 3);
/// assert!((keyframes[2].relative_start - 6.0 / 7.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Timeline {
    duration: f64,
    delay: f64,
    options: KeyframeOptions,
    segments: Segments,
}

impl Timeline {
    /// Create an empty timeline with no delay and default options
    ///
    /// `duration` is not validated here; see [`Timeline::run`].
    pub fn new(duration: f64) -> Self {
        Self::from_parts(duration, 0.0, KeyframeOptions::default(), Vec::new())
    }

    /// Create a timeline from already-built segments
    pub fn from_parts(
        duration: f64,
        delay: f64,
        options: KeyframeOptions,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Self {
        Self {
            duration,
            delay,
            options,
            segments: segments.into_iter().collect(),
        }
    }

    /// Builder: set the delay before the timeline begins
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Builder: set executor options
    pub fn with_options(mut self, options: KeyframeOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a segment positioned directly in timeline time
    pub fn append(
        &self,
        at: f64,
        duration: f64,
        effect: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.extended(std::iter::once(Segment::new(at, duration, effect)))
    }

    /// Append the segments sliced from the window `at..at + duration`
    ///
    /// `transform` receives an empty [`SliceBuilder`] for the window and
    /// returns the builder whose output is appended in order. Returning the
    /// builder untouched appends nothing.
    pub fn append_slices(
        &self,
        at: f64,
        duration: f64,
        transform: impl FnOnce(SliceBuilder) -> SliceBuilder,
    ) -> Self {
        let sliced = transform(SliceBuilder::new(Window::new(at, duration)));
        self.extended(sliced.into_output())
    }

    fn extended(&self, added: impl IntoIterator<Item = Segment>) -> Self {
        let mut segments: Segments = SmallVec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.extend(added);

        Self {
            duration: self.duration,
            delay: self.delay,
            options: self.options,
            segments,
        }
    }

    /// Express every segment as fractions of the total duration
    ///
    /// Fractions are plain ratios and are not clamped to `0.0..=1.0`.
    pub fn resolve(&self) -> Vec<RelativeKeyframe> {
        self.segments
            .iter()
            .map(|segment| RelativeKeyframe {
                relative_start: segment.start() / self.duration,
                relative_duration: segment.duration() / self.duration,
                effect: segment.effect().clone(),
            })
            .collect()
    }

    /// Hand the resolved keyframes to `executor`
    ///
    /// Does nothing and returns `None` when the timeline has no segments;
    /// in that case `completion` is dropped without being called.
    ///
    /// The caller must ensure `duration != 0`. A zero duration produces
    /// non-finite fractions and the executor decides what happens.
    pub fn run<E: KeyframeExecutor>(
        &self,
        mut executor: E,
        completion: Option<Completion>,
    ) -> Option<E::Handle> {
        if self.segments.is_empty() {
            tracing::trace!("Skipping run of empty timeline");
            return None;
        }

        tracing::debug!(
            duration = self.duration,
            delay = self.delay,
            segments = self.segments.len(),
            "Running keyframe timeline"
        );

        Some(executor.execute(KeyframeRequest {
            duration: self.duration,
            delay: self.delay,
            options: self.options,
            keyframes: self.resolve(),
            completion,
        }))
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn options(&self) -> &KeyframeOptions {
        &self.options
    }

    /// Segments in insertion order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Latest end time among all segments, if any
    pub fn end_time(&self) -> Option<f64> {
        self.segments.iter().map(Segment::end).reduce(f64::max)
    }
}
