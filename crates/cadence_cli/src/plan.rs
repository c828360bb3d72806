//! `cadence plan`: show what a timeline hands to its executor

use anyhow::Result;
use cadence_keyframes::{KeyframeOptions, RecordingExecutor};
use serde::Serialize;

use crate::config::TimelineFile;

/// Resolved view of a timeline file
#[derive(Debug, Serialize)]
pub struct Plan {
    pub duration: f64,
    pub delay: f64,
    pub options: KeyframeOptions,
    pub keyframes: Vec<PlanRow>,
}

/// One keyframe as the executor would receive it
#[derive(Debug, Serialize)]
pub struct PlanRow {
    pub effect: String,
    pub relative_start: f64,
    pub relative_duration: f64,
}

/// Build the timeline described by `file` and record what `run` forwards
pub fn plan(file: &TimelineFile) -> Plan {
    let timeline = file.build(|_| || {});

    let mut executor = RecordingExecutor::new();
    timeline.run(&mut executor, None);

    // Every appended segment carries a named effect, so labels line up
    // with recorded keyframes one to one.
    let keyframes = executor
        .take()
        .into_iter()
        .flat_map(|request| request.keyframes)
        .zip(file.labels())
        .map(|(keyframe, label)| PlanRow {
            effect: label.to_string(),
            relative_start: keyframe.relative_start,
            relative_duration: keyframe.relative_duration,
        })
        .collect();

    Plan {
        duration: timeline.duration(),
        delay: timeline.delay(),
        options: *timeline.options(),
        keyframes,
    }
}

pub fn print(plan: &Plan, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    println!(
        "duration {}s, delay {}s, {} keyframe(s)",
        plan.duration,
        plan.delay,
        plan.keyframes.len()
    );

    if plan.keyframes.is_empty() {
        println!("  (empty timeline; nothing would run)");
        return Ok(());
    }

    println!("  {:<24} {:>10} {:>10}", "effect", "start", "duration");
    for row in &plan.keyframes {
        println!(
            "  {:<24} {:>10.4} {:>10.4}",
            row.effect, row.relative_start, row.relative_duration
        );
    }

    Ok(())
}
