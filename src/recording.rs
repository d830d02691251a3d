//! Recorded tracker sessions
//!
//! A recording is JSON lines: one `TrackerEvent` per line, in delivery order.
//! Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # squat session, front camera
//! {"event": "isLoading", "value": false}
//! {"event": "classifiedExercise", "value": ["Squat", 1]}
//! ```

use crate::error::{Result, SquatCountError};
use crate::tracker::TrackerEvent;
use std::path::Path;
use tracing::info;

/// Parse a recording held in memory
pub fn parse_recording(text: &str) -> Result<Vec<TrackerEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| SquatCountError::RecordingParse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Read and parse a recording file
pub fn load_recording(path: &Path) -> Result<Vec<TrackerEvent>> {
    let text = std::fs::read_to_string(path)?;
    let events = parse_recording(&text)?;
    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
