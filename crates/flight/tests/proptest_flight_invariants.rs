//! Property-based tests for flight model invariants
//!
//! For arbitrary control sequences and time deltas:
//! - The speed angle never leaves [-90, 0]
//! - The orientation quaternion stays unit length
//! - A grounded plane never sinks below its ground plane

use glam::Vec3;
use proptest::prelude::*;
use terraflight_flight::{FlightControls, FlightModel, FlightStatus};
use terraflight_terrain::{HeightField, TerrainConfig, TerrainIndex};

fn flat_terrain() -> TerrainIndex {
    let field = HeightField::from_channel(2, 2, &[0; 4], 0.0, 1.0).expect("valid grid");
    let config = TerrainConfig {
        blocks_per_side: 1,
        block_scale: 400.0,
    };
    TerrainIndex::build(&config, field, None).expect("valid config")
}

/// One weighted-random control snapshot per step.
fn controls_strategy() -> impl Strategy<Value = FlightControls> {
    (any::<[bool; 10]>()).prop_map(|b| FlightControls {
        throttle_up: b[0],
        throttle_down: b[1],
        strafe_left: b[2],
        strafe_right: b[3],
        ascend: b[4],
        descend: b[5],
        pitch_up: b[6],
        pitch_down: b[7],
        yaw_left: b[8],
        yaw_right: b[9],
    })
}

proptest! {
    /// Property: for all input sequences and elapsed times, the speed
    /// angle stays clamped to [-90, 0] and the orientation stays unit.
    #[test]
    fn speed_angle_and_orientation_invariants(
        steps in prop::collection::vec((controls_strategy(), 0.0f32..0.1), 1..200),
    ) {
        let terrain = flat_terrain();
        let mut model = FlightModel::new(Vec3::new(0.0, 120.0, 0.0));
        for (controls, dt) in steps {
            model.apply_controls(&controls);
            model.update(&terrain, dt);

            let angle = model.speed_angle();
            prop_assert!((-90.0..=0.0).contains(&angle), "speed angle {} escaped", angle);

            let len = model.pose().orientation.length();
            prop_assert!((len - 1.0).abs() < 1e-4, "orientation drifted to length {}", len);
        }
    }

    /// Property: the plane never ends a tick below the ground plane
    /// while terrain is under it.
    #[test]
    fn never_below_ground(
        steps in prop::collection::vec((controls_strategy(), 0.0f32..0.1), 1..200),
    ) {
        let terrain = flat_terrain();
        let mut model = FlightModel::new(Vec3::new(0.0, 30.0, 0.0));
        for (controls, dt) in steps {
            model.apply_controls(&controls);
            model.update(&terrain, dt);

            let pos = model.pose().position;
            if let Some(height) = terrain.height_at(pos.x, pos.z) {
                if model.status() != FlightStatus::Crashed {
                    prop_assert!(
                        pos.y >= height + 2.0 - 1e-3,
                        "ended tick below ground: y = {}, ground = {}",
                        pos.y,
                        height + 2.0
                    );
                }
            }
        }
    }
}
