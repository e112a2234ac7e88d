#![warn(missing_docs)]
//! Deterministic testing surfaces: flight sample capture + JSONL logging.

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use terraflight_core::SimTick;
use terraflight_flight::{FlightModel, FlightStatus};

/// Per-tick flight record captured by headless tests and replays.
#[derive(Debug, Serialize)]
pub struct FlightSample {
    /// Simulation tick when the sample was taken.
    pub tick: SimTick,
    /// Plane position [x, y, z].
    pub position: [f32; 3],
    /// Speed angle in degrees.
    pub speed_angle: f32,
    /// Ground-contact status label.
    pub status: &'static str,
}

impl FlightSample {
    /// Snapshot the model at the given tick.
    pub fn capture(tick: SimTick, model: &FlightModel) -> Self {
        let pose = model.pose();
        Self {
            tick,
            position: pose.position.to_array(),
            speed_angle: model.speed_angle(),
            status: model.status().as_str(),
        }
    }

    /// Whether the plane survived to this sample.
    pub fn is_flying(&self) -> bool {
        self.status != FlightStatus::Crashed.as_str()
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append a serializable record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn sample_captures_model_state() {
        let model = FlightModel::new(Vec3::new(1.0, 2.0, 3.0));
        let sample = FlightSample::capture(SimTick::ZERO, &model);
        assert_eq!(sample.position, [1.0, 2.0, 3.0]);
        assert_eq!(sample.speed_angle, -90.0);
        assert_eq!(sample.status, "airborne");
        assert!(sample.is_flying());
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_record() {
        let path = std::env::temp_dir().join("terraflight_testkit_sink.jsonl");
        {
            let mut sink = JsonlSink::create(&path).expect("can create temp log");
            let model = FlightModel::new(Vec3::ZERO);
            sink.write(&FlightSample::capture(SimTick::ZERO, &model))
                .expect("can write sample");
            sink.write(&FlightSample::capture(SimTick::ZERO.advance(1), &model))
                .expect("can write sample");
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().all(|l| l.contains("\"speed_angle\"")));
    }
}
