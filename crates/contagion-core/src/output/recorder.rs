//! Time Series Recorder
//!
//! Append-only log of daily snapshots.

use bevy_ecs::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use contagion_events::Snapshot;

use super::stats::aggregate_snapshot;
use super::OutputError;
use crate::components::graph::PopulationGraph;
use crate::components::metrics::SocialMetrics;
use crate::components::world::SimulationClock;

/// Resource: ordered history of recorded snapshots
///
/// Days are strictly increasing. Nothing is compacted or rewritten; the only
/// way to empty it is a simulation reset.
#[derive(Resource, Debug, Clone, Default)]
pub struct TimeSeriesRecorder {
    snapshots: Vec<Snapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot. Returns false and drops it if its day does not
    /// come after the last recorded day.
    pub fn append(&mut self, snapshot: Snapshot) -> bool {
        if let Some(last) = self.snapshots.last() {
            if snapshot.day <= last.day {
                tracing::warn!(
                    day = snapshot.day,
                    last_day = last.day,
                    "rejected out-of-order snapshot"
                );
                return false;
            }
        }
        self.snapshots.push(snapshot);
        true
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Snapshot recorded for `day`, if any
    pub fn get(&self, day: u32) -> Option<&Snapshot> {
        self.snapshots
            .binary_search_by_key(&day, |s| s.day)
            .ok()
            .map(|i| &self.snapshots[i])
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Write the full history as a pretty JSON array
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(&self.snapshots)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write one snapshot per line
    pub fn write_jsonl(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        for snapshot in &self.snapshots {
            serde_json::to_writer(&mut writer, snapshot)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// System: Record today's snapshot after the step has committed
pub fn record_snapshot(
    clock: Res<SimulationClock>,
    graph: Res<PopulationGraph>,
    metrics: Res<SocialMetrics>,
    mut recorder: ResMut<TimeSeriesRecorder>,
) {
    let snapshot = aggregate_snapshot(&graph, &metrics, clock.day);
    tracing::debug!(
        day = snapshot.day,
        susceptible = snapshot.susceptible,
        infected = snapshot.infected,
        resistant = snapshot.resistant,
        "recorded snapshot"
    );
    recorder.append(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(day: u32) -> Snapshot {
        Snapshot {
            day,
            susceptible: 10,
            infected: 0,
            resistant: 0,
            trust: 75.0,
            chaos: 0.0,
            polarization: 0.0,
            social_cohesion: 80.0,
            critical_thinking: 50.0,
        }
    }

    #[test]
    fn test_append_in_order() {
        let mut recorder = TimeSeriesRecorder::new();
        assert!(recorder.is_empty());
        assert!(recorder.append(snapshot(0)));
        assert!(recorder.append(snapshot(1)));
        assert!(recorder.append(snapshot(5)));
        assert_eq!(recorder.len(), 3);
        assert_eq!(recorder.latest().unwrap().day, 5);
        assert_eq!(recorder.get(1).unwrap().day, 1);
        assert!(recorder.get(3).is_none());
    }

    #[test]
    fn test_rejects_non_increasing_day() {
        let mut recorder = TimeSeriesRecorder::new();
        recorder.append(snapshot(2));
        assert!(!recorder.append(snapshot(2)));
        assert!(!recorder.append(snapshot(1)));
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_write_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut recorder = TimeSeriesRecorder::new();
        recorder.append(snapshot(0));
        recorder.append(snapshot(1));
        recorder.write_json(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Snapshot> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, recorder.snapshots());
    }

    #[test]
    fn test_write_jsonl_one_line_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");

        let mut recorder = TimeSeriesRecorder::new();
        for day in 0..4 {
            recorder.append(snapshot(day));
        }
        recorder.write_jsonl(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }
}
