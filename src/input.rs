use crate::config::ControlsConfig;
use std::collections::HashMap;
use terraflight_flight::FlightControls;
use terraflight_input::InputState;
use tracing::warn;
use winit::keyboard::KeyCode;

/// Logical actions the player can bind keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ThrottleUp,
    ThrottleDown,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    Respawn,
    Quit,
}

impl Action {
    const ALL: [Action; 12] = [
        Action::ThrottleUp,
        Action::ThrottleDown,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Ascend,
        Action::Descend,
        Action::PitchUp,
        Action::PitchDown,
        Action::YawLeft,
        Action::YawRight,
        Action::Respawn,
        Action::Quit,
    ];

    fn name(self) -> &'static str {
        match self {
            Action::ThrottleUp => "throttle_up",
            Action::ThrottleDown => "throttle_down",
            Action::StrafeLeft => "strafe_left",
            Action::StrafeRight => "strafe_right",
            Action::Ascend => "ascend",
            Action::Descend => "descend",
            Action::PitchUp => "pitch_up",
            Action::PitchDown => "pitch_down",
            Action::YawLeft => "yaw_left",
            Action::YawRight => "yaw_right",
            Action::Respawn => "respawn",
            Action::Quit => "quit",
        }
    }

    fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }
}

fn default_bindings() -> HashMap<Action, Vec<KeyCode>> {
    HashMap::from([
        (Action::ThrottleUp, vec![KeyCode::KeyW]),
        (Action::ThrottleDown, vec![KeyCode::KeyS]),
        (Action::StrafeLeft, vec![KeyCode::KeyA]),
        (Action::StrafeRight, vec![KeyCode::KeyD]),
        (Action::Descend, vec![KeyCode::KeyZ]),
        (Action::Ascend, vec![KeyCode::KeyX]),
        (Action::PitchUp, vec![KeyCode::ArrowUp]),
        (Action::PitchDown, vec![KeyCode::ArrowDown]),
        (Action::YawLeft, vec![KeyCode::ArrowLeft]),
        (Action::YawRight, vec![KeyCode::ArrowRight]),
        (Action::Respawn, vec![KeyCode::KeyR]),
        (Action::Quit, vec![KeyCode::Escape]),
    ])
}

fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name.to_ascii_uppercase().as_str() {
        "A" => KeyCode::KeyA,
        "B" => KeyCode::KeyB,
        "C" => KeyCode::KeyC,
        "D" => KeyCode::KeyD,
        "E" => KeyCode::KeyE,
        "F" => KeyCode::KeyF,
        "G" => KeyCode::KeyG,
        "H" => KeyCode::KeyH,
        "I" => KeyCode::KeyI,
        "J" => KeyCode::KeyJ,
        "K" => KeyCode::KeyK,
        "L" => KeyCode::KeyL,
        "M" => KeyCode::KeyM,
        "N" => KeyCode::KeyN,
        "O" => KeyCode::KeyO,
        "P" => KeyCode::KeyP,
        "Q" => KeyCode::KeyQ,
        "R" => KeyCode::KeyR,
        "S" => KeyCode::KeyS,
        "T" => KeyCode::KeyT,
        "U" => KeyCode::KeyU,
        "V" => KeyCode::KeyV,
        "W" => KeyCode::KeyW,
        "X" => KeyCode::KeyX,
        "Y" => KeyCode::KeyY,
        "Z" => KeyCode::KeyZ,
        "UP" => KeyCode::ArrowUp,
        "DOWN" => KeyCode::ArrowDown,
        "LEFT" => KeyCode::ArrowLeft,
        "RIGHT" => KeyCode::ArrowRight,
        "SPACE" => KeyCode::Space,
        "ESCAPE" | "ESC" => KeyCode::Escape,
        "SHIFT" => KeyCode::ShiftLeft,
        "CTRL" | "CONTROL" => KeyCode::ControlLeft,
        "TAB" => KeyCode::Tab,
        "ENTER" | "RETURN" => KeyCode::Enter,
        _ => return None,
    };
    Some(key)
}

/// Key bindings: defaults overlaid with config overrides.
#[derive(Debug, Clone)]
pub struct Bindings {
    map: HashMap<Action, Vec<KeyCode>>,
}

impl Bindings {
    pub fn from_config(config: &ControlsConfig) -> Self {
        let mut map = default_bindings();
        for (action_name, key_names) in &config.bindings {
            let Some(action) = Action::from_name(action_name) else {
                warn!("Unknown action '{action_name}' in bindings, ignoring");
                continue;
            };
            let keys: Vec<KeyCode> = key_names
                .iter()
                .filter_map(|name| {
                    let key = parse_key(name);
                    if key.is_none() {
                        warn!("Unknown key '{name}' for action '{action_name}', ignoring");
                    }
                    key
                })
                .collect();
            if keys.is_empty() {
                warn!("Action '{action_name}' has no valid keys, keeping defaults");
                continue;
            }
            map.insert(action, keys);
        }
        Self { map }
    }

    pub fn pressed(&self, input: &InputState, action: Action) -> bool {
        self.map
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|&k| input.key_pressed(k)))
    }

    pub fn just_pressed(&self, input: &InputState, action: Action) -> bool {
        self.map
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|&k| input.key_just_pressed(k)))
    }

    /// Assemble the per-tick logical control snapshot.
    pub fn flight_controls(&self, input: &InputState) -> FlightControls {
        FlightControls {
            throttle_up: self.pressed(input, Action::ThrottleUp),
            throttle_down: self.pressed(input, Action::ThrottleDown),
            strafe_left: self.pressed(input, Action::StrafeLeft),
            strafe_right: self.pressed(input, Action::StrafeRight),
            ascend: self.pressed(input, Action::Ascend),
            descend: self.pressed(input, Action::Descend),
            pitch_up: self.pressed(input, Action::PitchUp),
            pitch_down: self.pressed(input, Action::PitchDown),
            yaw_left: self.pressed(input, Action::YawLeft),
            yaw_right: self.pressed(input, Action::YawRight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_default_binding() {
        let defaults = default_bindings();
        for action in Action::ALL {
            assert!(
                defaults.get(&action).is_some_and(|keys| !keys.is_empty()),
                "action {action:?} unbound"
            );
        }
    }

    #[test]
    fn action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
    }

    #[test]
    fn parse_key_accepts_common_names() {
        assert_eq!(parse_key("w"), Some(KeyCode::KeyW));
        assert_eq!(parse_key("UP"), Some(KeyCode::ArrowUp));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Escape));
        assert_eq!(parse_key("NoSuchKey"), None);
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut config = ControlsConfig::default();
        config
            .bindings
            .insert("yaw_left".into(), vec!["Q".into()]);
        let bindings = Bindings::from_config(&config);
        assert_eq!(bindings.map[&Action::YawLeft], vec![KeyCode::KeyQ]);
        // Untouched actions keep their defaults.
        assert_eq!(bindings.map[&Action::ThrottleUp], vec![KeyCode::KeyW]);
    }

    #[test]
    fn bad_overrides_keep_defaults() {
        let mut config = ControlsConfig::default();
        config
            .bindings
            .insert("yaw_left".into(), vec!["NoSuchKey".into()]);
        let bindings = Bindings::from_config(&config);
        assert_eq!(bindings.map[&Action::YawLeft], vec![KeyCode::ArrowLeft]);
    }
}
