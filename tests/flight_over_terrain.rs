//! End-to-end flight scenarios over procedurally generated terrain.
//!
//! These drive the full physics stack (assets -> terrain -> flight ->
//! camera) headlessly at the fixed tick rate, the same way the game
//! loop does.

use glam::Vec3;
use terraflight_assets::HeightmapImage;
use terraflight_camera::ChaseCamera;
use terraflight_core::{SimTick, TICK_SECONDS};
use terraflight_flight::{FlightControls, FlightModel, FlightStatus};
use terraflight_terrain::{HeightField, TerrainConfig, TerrainIndex};
use terraflight_testkit::{FlightSample, JsonlSink};

/// The classic demo terrain: 5x5 blocks at scale 75, heights in [0, 18.75].
fn demo_terrain() -> TerrainIndex {
    let heightmap = HeightmapImage::synthetic(64, 64);
    let field = HeightField::from_channel(
        heightmap.width,
        heightmap.height,
        &heightmap.samples,
        0.0,
        0.25,
    )
    .expect("synthetic heightmap is valid");
    TerrainIndex::build(&TerrainConfig::default(), field, None).expect("default config is valid")
}

fn throttle() -> FlightControls {
    FlightControls {
        throttle_up: true,
        ..Default::default()
    }
}

fn run_ticks(
    model: &mut FlightModel,
    terrain: &TerrainIndex,
    controls: FlightControls,
    ticks: u32,
) {
    for _ in 0..ticks {
        model.apply_controls(&controls);
        model.update(terrain, TICK_SECONDS);
    }
}

#[test]
fn powered_flight_crosses_the_terrain() {
    let terrain = demo_terrain();
    // High enough that the spin-up descent stays above the tallest hill.
    let mut model = FlightModel::new(Vec3::new(0.0, 60.0, 0.0));

    // Ten seconds at full throttle.
    run_ticks(&mut model, &terrain, throttle(), 600);

    let pose = model.pose();
    assert_eq!(model.status(), FlightStatus::Airborne);
    // Level flight travels along -Z at close to MAX_SPEED.
    assert!(pose.position.z < -100.0, "only reached {}", pose.position.z);
    // Still well inside the 5x75-wide tiling.
    assert!(terrain.height_at(pose.position.x, pose.position.z).is_some());
}

#[test]
fn flight_trajectory_is_deterministic() {
    let terrain = demo_terrain();

    let fly = || {
        let mut model = FlightModel::new(Vec3::new(0.0, 30.0, 0.0));
        let mut trajectory = Vec::new();
        for tick in 0..300u32 {
            let controls = if tick < 180 {
                throttle()
            } else {
                FlightControls {
                    throttle_up: true,
                    yaw_left: true,
                    ..Default::default()
                }
            };
            model.apply_controls(&controls);
            model.update(&terrain, TICK_SECONDS);
            trajectory.push(model.pose());
        }
        trajectory
    };

    let first = fly();
    let second = fly();
    // Bit-identical: same script, same tick rate, same trajectory.
    assert_eq!(first, second);
}

#[test]
fn camera_tracks_the_whole_flight() {
    let terrain = demo_terrain();
    let mut model = FlightModel::new(Vec3::new(0.0, 30.0, 0.0));
    let mut camera = ChaseCamera::new(16.0 / 9.0);

    for _ in 0..600 {
        model.apply_controls(&throttle());
        model.update(&terrain, TICK_SECONDS);
        let pose = model.pose();
        camera.follow(&pose, model.camera_distance());

        let gap = (camera.position - pose.position).length();
        assert!(
            (gap - model.camera_distance()).abs() < 1e-3,
            "camera lost the plane: gap {gap}"
        );
        // The plane stays in front of the camera.
        let in_view = camera.view_matrix().transform_point3(pose.position);
        assert!(in_view.z < 0.0);
    }
}

#[test]
fn unpowered_stall_ends_in_a_crash() {
    let terrain = demo_terrain();
    let mut model = FlightModel::new(Vec3::new(0.0, 30.0, 0.0));

    let mut log = JsonlSink::create(std::env::temp_dir().join("stall_crash.jsonl"))
        .expect("can create temp log");
    let mut tick = SimTick::ZERO;

    // No throttle: the stalled plane drops onto the hills nose first.
    for _ in 0..1200 {
        model.apply_controls(&FlightControls::NONE);
        model.update(&terrain, TICK_SECONDS);
        tick = tick.advance(1);
        log.write(&FlightSample::capture(tick, &model))
            .expect("can write sample");
        if model.status() == FlightStatus::Crashed {
            break;
        }
    }

    assert_eq!(model.status(), FlightStatus::Crashed);
    assert!(!FlightSample::capture(tick, &model).is_flying());

    // Respawn restores powered flight from the spawn point.
    model.respawn();
    assert_eq!(model.status(), FlightStatus::Airborne);
    assert_eq!(model.pose().position, Vec3::new(0.0, 30.0, 0.0));
}

#[test]
fn terrain_clamp_holds_over_every_block() {
    let terrain = demo_terrain();
    // Cross several block rows; the tallest terrain tops out at 18.75.
    let mut model = FlightModel::new(Vec3::new(-150.0, 40.0, 150.0));

    for _ in 0..900 {
        model.apply_controls(&throttle());
        model.update(&terrain, TICK_SECONDS);
        let pos = model.pose().position;
        if let Some(height) = terrain.height_at(pos.x, pos.z) {
            if model.status() != FlightStatus::Crashed {
                assert!(
                    pos.y >= height + 2.0 - 1e-3,
                    "below terrain at ({}, {}): y = {}, ground = {}",
                    pos.x,
                    pos.z,
                    pos.y,
                    height + 2.0
                );
            }
        }
    }
}
