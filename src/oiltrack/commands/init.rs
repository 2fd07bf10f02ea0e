use crate::commands::{CmdMessage, CmdResult, TrackerPaths};
use crate::config::TrackerConfig;
use crate::error::Result;
use std::fs;

/// Creates the data directory and writes a default config unless one exists.
pub fn run(paths: &TrackerPaths) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    fs::create_dir_all(dir)?;
    let mut result = CmdResult::default();

    if TrackerConfig::exists_in(dir) {
        result.add_message(CmdMessage::info(format!(
            "Config already present in {}",
            dir.display()
        )));
    } else {
        TrackerConfig::default().save(dir)?;
    }

    result.add_message(CmdMessage::success(format!(
        "Initialized oiltrack at {}",
        dir.display()
    )));
    Ok(result)
}
