//! `cadence play`: drive a timeline through the frame scheduler

use anyhow::Result;
use cadence_keyframes::KeyframeScheduler;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::TimelineFile;

/// Playback settings from the command line
#[derive(Debug, Clone, Copy)]
pub struct PlaySettings {
    pub fps: u32,
    /// Cycles to play before cancelling a repeating timeline
    pub cycles: u32,
    /// Sleep between frames instead of stepping as fast as possible
    pub realtime: bool,
}

/// An effect fired during playback
#[derive(Debug, Clone, PartialEq)]
pub struct Fired {
    pub time: f64,
    pub effect: String,
}

/// How playback ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Timeline had no keyframes; nothing ran
    Empty,
    /// Completion fired with the given flag
    Completed { finished: bool, fired: Vec<Fired> },
}

pub fn play(file: &TimelineFile, settings: PlaySettings) -> Result<Outcome> {
    if settings.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }

    let clock = Arc::new(Mutex::new(0.0_f64));
    let fired = Arc::new(Mutex::new(Vec::new()));

    let timeline = file.build(|label| {
        let clock = clock.clone();
        let fired = fired.clone();
        let effect = label.to_string();
        move || {
            let time = *clock.lock().unwrap_or_else(|e| e.into_inner());
            tracing::debug!(time, effect = %effect, "Effect fired");
            fired
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(Fired {
                    time,
                    effect: effect.clone(),
                });
        }
    });

    let finished = Arc::new(Mutex::new(None));
    let slot = finished.clone();

    let mut scheduler = KeyframeScheduler::new();
    let id = match timeline.run(
        &mut scheduler,
        Some(Box::new(move |done: bool| {
            *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(done);
        })),
    ) {
        None => return Ok(Outcome::Empty),
        Some(None) => anyhow::bail!("Timeline was rejected by the scheduler (see log)"),
        Some(Some(id)) => id,
    };

    let dt = 1.0 / settings.fps as f64;
    let cycle_end = timeline.delay() + timeline.duration();

    while scheduler.is_running(id) {
        // Sub-step so a single frame never carries past a cycle boundary
        let mut remaining = dt;
        while remaining > 0.0 && scheduler.is_running(id) {
            let until_boundary = scheduler
                .elapsed(id)
                .map_or(remaining, |elapsed| cycle_end - elapsed);
            let step = if until_boundary > 0.0 {
                remaining.min(until_boundary)
            } else {
                remaining
            };

            *clock.lock().unwrap_or_else(|e| e.into_inner()) += step;
            scheduler.tick(step);
            remaining -= step;

            if scheduler.cycle(id).is_some_and(|cycle| cycle >= settings.cycles) {
                tracing::info!(cycles = settings.cycles, "Stopping repeating timeline");
                scheduler.cancel(id);
            }
        }

        if settings.realtime {
            std::thread::sleep(Duration::from_secs_f64(dt));
        }
    }

    let finished = finished
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .unwrap_or(false);
    let fired = std::mem::take(&mut *fired.lock().unwrap_or_else(|e| e.into_inner()));

    Ok(Outcome::Completed { finished, fired })
}

pub fn print(outcome: &Outcome) {
    match outcome {
        Outcome::Empty => println!("Timeline is empty; nothing to play."),
        Outcome::Completed { finished, fired } => {
            for event in fired {
                println!("{:>9.3}s  {}", event.time, event.effect);
            }
            if *finished {
                println!("finished");
            } else {
                println!("cancelled");
            }
        }
    }
}
