//! The `ticksync render` command: print one alert file's rewritten body,
//! exactly as a deploy would submit it.

use std::path::Path;

use anyhow::{Context, Result};

use ticksync_core::params::DeployParams;
use ticksync_core::template;

pub fn run_render(params: &DeployParams, file: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read alert file {}", file.display()))?;
    Ok(template::rewrite(&raw, params))
}
