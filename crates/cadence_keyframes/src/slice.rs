//! Slicing one time window into several segments
//!
//! A [`SliceBuilder`] is handed to the closure passed to
//! [`Timeline::append_slices`](crate::Timeline::append_slices). Each call to
//! [`SliceBuilder::slice`] positions a child segment relative to the window
//! start, so several effects can run at finer-grained times inside one
//! top-level keyframe.

use smallvec::SmallVec;

use crate::segment::{Segment, Window};

/// Inline capacity for sliced segments before spilling to the heap
pub(crate) const INLINE_SEGMENTS: usize = 4;

pub(crate) type Segments = SmallVec<[Segment; INLINE_SEGMENTS]>;

/// Immutable accumulator of segments sliced from a single window
///
/// # Example
///
/// ```rust
/// use cadence_keyframes::{SliceBuilder, Window};
///
/// let builder = SliceBuilder::new(Window::new(5.0, 2.0))
///     .slice(0.0, 1.0, || {})
///     .slice(1.0, 2.0, || {});
///
/// assert_eq!(builder.output()[1].start(), 6.0);
/// ```
#[derive(Clone, Debug)]
pub struct SliceBuilder {
    window: Window,
    output: Segments,
}

impl SliceBuilder {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            output: SmallVec::new(),
        }
    }

    /// Add a segment spanning `relative_from..relative_to` inside the window
    ///
    /// Offsets are not checked: inverted ranges yield a negative duration and
    /// ranges outside the window yield segments outside it.
    pub fn slice(
        &self,
        relative_from: f64,
        relative_to: f64,
        effect: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        let segment = Segment::new(
            self.window.start + relative_from,
            relative_to - relative_from,
            effect,
        );

        let mut output = self.output.clone();
        output.push(segment);

        Self {
            window: self.window,
            output,
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Segments produced so far, in slice order
    pub fn output(&self) -> &[Segment] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub(crate) fn into_output(self) -> Segments {
        self.output
    }
}
