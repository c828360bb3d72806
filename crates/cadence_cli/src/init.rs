//! `cadence init`: write a sample timeline file

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Sample timeline: a label fading out while another fades in
pub const SAMPLE_TIMELINE: &str = r#"# Cadence timeline
#
# Times are in seconds. Each [[keyframe]] sets either `effect` or `slices`;
# slice offsets are relative to the keyframe's `at`.

[animation]
duration = 0.7
delay = 0.0

[animation.options]
allow_user_interaction = false
repeat = false
calculation_mode = "linear"

[[keyframe]]
at = 0.2
duration = 0.3
effect = "label-out"

[[keyframe]]
at = 0.3
duration = 0.4
slices = [
    { from = 0.0, to = 0.2, effect = "label-in-half" },
    { from = 0.2, to = 0.4, effect = "label-in" },
]
"#;

/// Write the sample timeline to `path`
pub fn create_timeline(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(path, SAMPLE_TIMELINE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
