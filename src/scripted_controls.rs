use serde::Deserialize;
use std::{fs, path::Path};
use terraflight_flight::FlightControls;

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    throttle_up: bool,
    #[serde(default)]
    throttle_down: bool,
    #[serde(default)]
    strafe_left: bool,
    #[serde(default)]
    strafe_right: bool,
    #[serde(default)]
    ascend: bool,
    #[serde(default)]
    descend: bool,
    #[serde(default)]
    pitch_up: bool,
    #[serde(default)]
    pitch_down: bool,
    #[serde(default)]
    yaw_left: bool,
    #[serde(default)]
    yaw_right: bool,
}

impl ScriptedStep {
    fn controls(&self) -> FlightControls {
        FlightControls {
            throttle_up: self.throttle_up,
            throttle_down: self.throttle_down,
            strafe_left: self.strafe_left,
            strafe_right: self.strafe_right,
            ascend: self.ascend,
            descend: self.descend,
            pitch_up: self.pitch_up,
            pitch_down: self.pitch_down,
            yaw_left: self.yaw_left,
            yaw_right: self.yaw_right,
        }
    }
}

/// Plays back timed control steps for automated runs.
///
/// Advancing past the last step holds its controls forever, so a script
/// can end with "keep flying level".
pub struct ScriptedControls {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
}

impl ScriptedControls {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: ScriptFile = serde_json::from_str(&contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("control script contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
        })
    }

    /// Advance playback by `dt` seconds and return the active controls.
    pub fn advance(&mut self, dt: f32) -> FlightControls {
        self.time_in_step += dt;
        while self.index < self.steps.len() && self.time_in_step >= self.steps[self.index].duration
        {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                break;
            }
        }
        self.steps[self.index].controls()
    }
}
