//! Logical control snapshot consumed by the flight model.

/// Which logical flight controls are held this tick.
///
/// The model never sees a keyboard; whatever drives the game (winit
/// bindings, a scripted sequence, a test) fills this in each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightControls {
    /// Raise the speed angle toward level max-thrust flight.
    pub throttle_up: bool,
    /// Push the speed angle down toward the stall.
    pub throttle_down: bool,
    /// Slide left in the plane's frame.
    pub strafe_left: bool,
    /// Slide right in the plane's frame.
    pub strafe_right: bool,
    /// Climb in the plane's frame.
    pub ascend: bool,
    /// Sink in the plane's frame.
    pub descend: bool,
    /// Rotate the nose up.
    pub pitch_up: bool,
    /// Rotate the nose down.
    pub pitch_down: bool,
    /// Yaw left.
    pub yaw_left: bool,
    /// Yaw right.
    pub yaw_right: bool,
}

impl FlightControls {
    /// No controls held.
    pub const NONE: Self = Self {
        throttle_up: false,
        throttle_down: false,
        strafe_left: false,
        strafe_right: false,
        ascend: false,
        descend: false,
        pitch_up: false,
        pitch_down: false,
        yaw_left: false,
        yaw_right: false,
    };

    /// True when any control is held.
    pub fn any(&self) -> bool {
        *self != Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(FlightControls::default(), FlightControls::NONE);
        assert!(!FlightControls::default().any());
    }

    #[test]
    fn any_detects_held_control() {
        let controls = FlightControls {
            yaw_left: true,
            ..Default::default()
        };
        assert!(controls.any());
    }
}
