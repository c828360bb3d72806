//! Timeline description files (timeline.toml)

use anyhow::{Context, Result};
use cadence_keyframes::{KeyframeOptions, Timeline};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level timeline file
#[derive(Debug, Deserialize, Serialize)]
pub struct TimelineFile {
    pub animation: AnimationConfig,
    #[serde(default, rename = "keyframe")]
    pub keyframes: Vec<KeyframeConfig>,
}

/// Total duration, delay and executor options
#[derive(Debug, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Total duration in seconds
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub options: KeyframeOptions,
}

/// One keyframe; either a single effect or a list of slices
#[derive(Debug, Deserialize, Serialize)]
pub struct KeyframeConfig {
    pub at: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slices: Option<Vec<SliceConfig>>,
}

/// A slice of a keyframe window, offsets relative to the keyframe start
#[derive(Debug, Deserialize, Serialize)]
pub struct SliceConfig {
    pub from: f64,
    pub to: f64,
    pub effect: String,
}

impl TimelineFile {
    /// Load and check a timeline file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "No timeline file at {}. Run `cadence init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse and check timeline TOML
    pub fn parse(content: &str) -> Result<Self> {
        let file: TimelineFile = toml::from_str(content)?;
        file.check()?;
        Ok(file)
    }

    fn check(&self) -> Result<()> {
        for (index, keyframe) in self.keyframes.iter().enumerate() {
            match (&keyframe.effect, &keyframe.slices) {
                (Some(_), None) | (None, Some(_)) => {}
                (Some(_), Some(_)) => anyhow::bail!(
                    "keyframe #{} at {}s sets both `effect` and `slices`",
                    index + 1,
                    keyframe.at
                ),
                (None, None) => anyhow::bail!(
                    "keyframe #{} at {}s needs either `effect` or `slices`",
                    index + 1,
                    keyframe.at
                ),
            }
        }
        Ok(())
    }

    /// Effect names in the order their segments are appended
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        for keyframe in &self.keyframes {
            if let Some(effect) = &keyframe.effect {
                labels.push(effect.as_str());
            }
            for slice in keyframe.slices.iter().flatten() {
                labels.push(slice.effect.as_str());
            }
        }
        labels
    }

    /// Build a timeline, asking `make_effect` for each named effect
    pub fn build<F, E>(&self, make_effect: F) -> Timeline
    where
        F: Fn(&str) -> E,
        E: Fn() + Send + Sync + 'static,
    {
        let base = Timeline::new(self.animation.duration)
            .with_delay(self.animation.delay)
            .with_options(self.animation.options);

        self.keyframes.iter().fold(base, |timeline, keyframe| {
            match (&keyframe.effect, &keyframe.slices) {
                (Some(effect), _) => {
                    let effect = make_effect(effect.as_str());
                    timeline.append(keyframe.at, keyframe.duration, effect)
                }
                (None, Some(slices)) => {
                    timeline.append_slices(keyframe.at, keyframe.duration, |window| {
                        slices.iter().fold(window, |window, slice| {
                            let effect = make_effect(slice.effect.as_str());
                            window.slice(slice.from, slice.to, effect)
                        })
                    })
                }
                (None, None) => timeline,
            }
        })
    }
}
