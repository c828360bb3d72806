//! Frame-driven keyframe executor
//!
//! [`KeyframeScheduler`] keeps every running animation and fires keyframe
//! effects as time is advanced with [`KeyframeScheduler::tick`].

use std::time::Instant;

use slotmap::{new_key_type, SlotMap};

use crate::error::ScheduleError;
use crate::executor::{KeyframeExecutor, KeyframeRequest};

new_key_type! {
    pub struct AnimationId;
}

/// Relative slack when deciding a cycle has reached its end
const CYCLE_END_TOLERANCE: f64 = 1e-9;

/// An animation in flight
struct RunningAnimation {
    request: KeyframeRequest,
    /// Seconds since the animation was scheduled, delay included
    elapsed: f64,
    /// One flag per keyframe, reset every cycle
    fired: Vec<bool>,
    cycle: u32,
}

impl RunningAnimation {
    fn new(request: KeyframeRequest) -> Self {
        let fired = vec![false; request.keyframes.len()];
        Self {
            request,
            elapsed: 0.0,
            fired,
            cycle: 0,
        }
    }

    /// Progress within the current cycle (0.0 during the delay)
    fn progress(&self) -> f64 {
        let local = self.elapsed - self.request.delay;
        if local <= 0.0 {
            return 0.0;
        }
        (local / self.request.duration).min(1.0)
    }

    /// Fire every keyframe whose start is at or before `progress`
    fn fire_reached(&mut self, progress: f64) {
        for (keyframe, fired) in self.request.keyframes.iter().zip(self.fired.iter_mut()) {
            if !*fired && keyframe.relative_start <= progress {
                *fired = true;
                tracing::trace!(
                    relative_start = keyframe.relative_start,
                    cycle = self.cycle,
                    "Firing keyframe"
                );
                (keyframe.effect)();
            }
        }
    }

    /// Advance by `dt` seconds; returns true once the animation is finished
    fn step(&mut self, dt: f64) -> bool {
        self.elapsed += dt;

        loop {
            let local = self.elapsed - self.request.delay;
            if local < 0.0 {
                return false;
            }

            let progress = (local / self.request.duration).min(1.0);
            self.fire_reached(progress);

            if progress < 1.0 - CYCLE_END_TOLERANCE {
                return false;
            }

            // Anything still unfired starts past the end; fire it now
            self.fire_reached(f64::INFINITY);

            if !self.request.options.repeat {
                return true;
            }

            self.elapsed -= self.request.duration;
            self.cycle += 1;
            self.fired.iter_mut().for_each(|f| *f = false);

            // Landed on the boundary: the new cycle's keyframes wait for the next tick
            let leftover = self.elapsed - self.request.delay;
            if leftover <= CYCLE_END_TOLERANCE * self.request.duration {
                return false;
            }
        }
    }
}

/// Executor that fires keyframe effects as time is ticked forward
///
/// Each keyframe's effect runs once per cycle, when progress first reaches
/// its relative start. Keyframes reached in the same tick fire in
/// registration order.
pub struct KeyframeScheduler {
    animations: SlotMap<AnimationId, RunningAnimation>,
    last_frame: Instant,
}

impl KeyframeScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    /// Validate and schedule a request
    ///
    /// On error the request, including its completion, is dropped.
    pub fn try_schedule(
        &mut self,
        request: KeyframeRequest,
    ) -> Result<AnimationId, ScheduleError> {
        validate(&request)?;

        tracing::debug!(
            duration = request.duration,
            delay = request.delay,
            keyframes = request.keyframes.len(),
            "Scheduling keyframe animation"
        );

        Ok(self.animations.insert(RunningAnimation::new(request)))
    }

    /// Advance every animation by `dt` seconds
    ///
    /// Negative or non-finite steps are ignored.
    pub fn tick(&mut self, dt: f64) {
        if !(dt.is_finite() && dt >= 0.0) {
            tracing::warn!("Ignoring invalid tick step: {}", dt);
            return;
        }

        let mut finished = Vec::new();

        for (id, animation) in self.animations.iter_mut() {
            if animation.step(dt) {
                finished.push(id);
            }
        }

        for id in finished {
            if let Some(mut animation) = self.animations.remove(id) {
                tracing::debug!(cycle = animation.cycle, "Keyframe animation finished");
                animation.request.complete(true);
            }
        }
    }

    /// Advance by the wall-clock time since the previous call
    pub fn tick_now(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.tick(dt);
    }

    /// Stop an animation without finishing it
    ///
    /// Its completion is called with `false`. Returns whether it was running.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        match self.animations.remove(id) {
            Some(mut animation) => {
                tracing::debug!(cycle = animation.cycle, "Keyframe animation cancelled");
                animation.request.complete(false);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Seconds since the animation was scheduled, delay included
    pub fn elapsed(&self, id: AnimationId) -> Option<f64> {
        self.animations.get(id).map(|a| a.elapsed)
    }

    /// Progress through the current cycle (0.0 to 1.0)
    pub fn progress(&self, id: AnimationId) -> Option<f64> {
        self.animations.get(id).map(RunningAnimation::progress)
    }

    /// Number of completed cycles of a repeating animation
    pub fn cycle(&self, id: AnimationId) -> Option<u32> {
        self.animations.get(id).map(|a| a.cycle)
    }
}

impl Default for KeyframeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyframeExecutor for KeyframeScheduler {
    /// `None` when the request was rejected
    type Handle = Option<AnimationId>;

    fn execute(&mut self, mut request: KeyframeRequest) -> Option<AnimationId> {
        if let Err(err) = validate(&request) {
            tracing::warn!("Rejected keyframe animation: {}", err);
            request.complete(false);
            return None;
        }
        self.try_schedule(request).ok()
    }
}

fn validate(request: &KeyframeRequest) -> Result<(), ScheduleError> {
    if !(request.duration.is_finite() && request.duration > 0.0) {
        return Err(ScheduleError::InvalidDuration(request.duration));
    }
    if !(request.delay.is_finite() && request.delay >= 0.0) {
        return Err(ScheduleError::InvalidDelay(request.delay));
    }
    for (index, keyframe) in request.keyframes.iter().enumerate() {
        if !(keyframe.relative_start.is_finite() && keyframe.relative_duration.is_finite()) {
            return Err(ScheduleError::NonFiniteKeyframe {
                index,
                relative_start: keyframe.relative_start,
                relative_duration: keyframe.relative_duration,
            });
        }
    }
    Ok(())
}
