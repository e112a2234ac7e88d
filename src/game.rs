//! Game world state: terrain, plane, chase camera, and the render loop.

use crate::config::GameConfig;
use crate::input::{Action, Bindings};
use crate::scripted_controls::ScriptedControls;
use anyhow::Result;
use glam::{Mat4, Vec3, Vec4};
use std::sync::Arc;
use std::time::Instant;
use terraflight_assets::HeightmapImage;
use terraflight_camera::ChaseCamera;
use terraflight_core::{SimTick, TICK_SECONDS};
use terraflight_flight::FlightModel;
use terraflight_input::InputState;
use terraflight_render::{
    heightfield_mesh, plane_mesh, MeshBuffer, ModelInstance, Renderer, SceneLighting,
};
use terraflight_terrain::{HeightField, TerrainConfig, TerrainIndex};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

/// Game action to communicate with the main loop.
pub enum GameAction {
    /// Keep running.
    Continue,
    /// Quit the application.
    Quit,
}

/// Everything the running game owns.
pub struct GameWorld {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputState,
    bindings: Bindings,
    script: Option<ScriptedControls>,

    terrain: TerrainIndex,
    flight: FlightModel,
    camera: ChaseCamera,

    base_mesh: MeshBuffer,
    city_mesh: Option<MeshBuffer>,
    city_block_index: Option<usize>,
    terrain_instances: Vec<ModelInstance>,
    plane_mesh: MeshBuffer,
    plane_instance: ModelInstance,
    plane_scale: f32,

    last_frame: Instant,
    accumulator: f32,
    tick: SimTick,
    max_ticks: Option<u64>,
    camera_zoom: f32,
}

impl GameWorld {
    /// Create the window, GPU resources, terrain, and plane.
    pub fn new(
        event_loop: &EventLoopWindowTarget<()>,
        config: GameConfig,
        script: Option<ScriptedControls>,
        max_ticks: Option<u64>,
    ) -> Result<Self> {
        tracing::info!("Initializing game world...");

        let window = Arc::new(
            WindowBuilder::new()
                .with_title("terraflight")
                .with_inner_size(LogicalSize::new(
                    config.window.width,
                    config.window.height,
                ))
                .build(event_loop)?,
        );

        let renderer = pollster::block_on(Renderer::new(window.clone()))?;

        // Decode (or synthesize) the height sources.
        let heightmap = match &config.terrain.heightmap {
            Some(path) => HeightmapImage::from_path(path)?,
            None => {
                let res = config.terrain.synthetic_resolution.max(2);
                tracing::warn!("No heightmap configured, generating procedural terrain");
                HeightmapImage::synthetic(res, res)
            }
        };
        let base_field = HeightField::from_channel(
            heightmap.width,
            heightmap.height,
            &heightmap.samples,
            config.terrain.min_y,
            config.terrain.max_y,
        )?;
        let city_field = match &config.terrain.city_heightmap {
            Some(path) => {
                let city = HeightmapImage::from_path(path)?;
                Some(HeightField::from_channel(
                    city.width,
                    city.height,
                    &city.samples,
                    config.terrain.min_y,
                    config.terrain.max_y,
                )?)
            }
            None => None,
        };

        // Meshes come from the same fields the height query reads.
        let base_mesh_cpu = heightfield_mesh(&base_field, config.terrain.texture_repeat);
        let city_mesh_cpu = city_field
            .as_ref()
            .map(|field| heightfield_mesh(field, config.terrain.texture_repeat));

        let terrain_config = TerrainConfig {
            blocks_per_side: config.terrain.blocks_per_side,
            block_scale: config.terrain.block_scale,
        };
        let has_city = city_field.is_some();
        let terrain = TerrainIndex::build(&terrain_config, base_field, city_field)?;

        let base_mesh = renderer.upload_mesh(&base_mesh_cpu);
        let city_mesh = city_mesh_cpu.as_ref().map(|mesh| renderer.upload_mesh(mesh));
        let n = terrain.blocks_per_side();
        let city_block_index = has_city.then_some((n / 2) * n + n / 2);

        let terrain_instances: Vec<ModelInstance> = terrain
            .blocks()
            .iter()
            .map(|block| {
                let model = Mat4::from_translation(block.origin())
                    * Mat4::from_scale(Vec3::splat(block.scale()));
                renderer.create_instance(model)
            })
            .collect();

        let plane_mesh = renderer.upload_mesh(&plane_mesh());
        let plane_instance =
            renderer.create_tinted_instance(Mat4::IDENTITY, Vec4::new(0.62, 0.66, 0.72, 0.0));

        let lighting = SceneLighting {
            light_direction: Vec3::from(config.scene.light_direction),
            light_color: Vec3::from(config.scene.light_color),
            ambient_color: Vec3::from(config.scene.ambient_color),
            fog_color: Vec3::from(config.scene.fog_color),
            fog_density: config.scene.fog_density,
            zenith_color: Vec3::from(config.scene.zenith_color),
        };
        renderer.update_lighting(&lighting);

        let flight = FlightModel::new(Vec3::new(0.0, config.plane.spawn_height, 0.0))
            .with_sensitivity(config.controls.sensitivity);
        let mut camera = ChaseCamera::new(renderer.aspect_ratio());
        camera.tilt = config.camera.tilt_degrees.to_radians();

        tracing::info!(
            blocks = terrain.blocks().len(),
            has_city,
            "game world ready"
        );

        Ok(Self {
            window,
            renderer,
            input: InputState::new(),
            bindings: Bindings::from_config(&config.controls),
            script,
            terrain,
            flight,
            camera,
            base_mesh,
            city_mesh,
            city_block_index,
            terrain_instances,
            plane_mesh,
            plane_instance,
            plane_scale: config.plane.scale,
            last_frame: Instant::now(),
            accumulator: 0.0,
            tick: SimTick::ZERO,
            max_ticks,
            camera_zoom: 0.0,
        })
    }

    /// Handle one winit event.
    pub fn handle_event(
        &mut self,
        event: &Event<()>,
        _elwt: &EventLoopWindowTarget<()>,
    ) -> GameAction {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.window.id() => {
                self.input.handle_event(event);
                match event {
                    WindowEvent::CloseRequested => return GameAction::Quit,
                    WindowEvent::KeyboardInput { .. } => {
                        if self.bindings.just_pressed(&self.input, Action::Quit) {
                            return GameAction::Quit;
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        self.renderer.resize((new_size.width, new_size.height));
                        self.camera.set_aspect(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => return self.update_and_render(),
                    _ => {}
                }
            }
            Event::AboutToWait => {
                self.window.request_redraw();
            }
            _ => {}
        }
        GameAction::Continue
    }

    /// Advance the simulation by however much wall-clock time passed,
    /// in fixed ticks, then draw one frame.
    fn update_and_render(&mut self) -> GameAction {
        let now = Instant::now();
        // Clamp so a stall (debugger, window drag) doesn't cause a
        // catch-up burst of hundreds of ticks.
        let frame_dt = (now - self.last_frame).as_secs_f32().min(0.25);
        self.last_frame = now;

        let controls = match &mut self.script {
            Some(script) => script.advance(frame_dt),
            None => self.bindings.flight_controls(&self.input),
        };

        if self.bindings.just_pressed(&self.input, Action::Respawn) {
            self.flight.respawn();
        }

        self.accumulator += frame_dt;
        while self.accumulator >= TICK_SECONDS {
            self.flight.apply_controls(&controls);
            self.flight.update(&self.terrain, TICK_SECONDS);
            self.tick = self.tick.advance(1);
            self.accumulator -= TICK_SECONDS;

            if let Some(max) = self.max_ticks {
                if self.tick.0 >= max {
                    tracing::info!(ticks = self.tick.0, "tick budget reached, exiting");
                    return GameAction::Quit;
                }
            }
        }

        // Mouse wheel zooms the chase distance.
        self.camera_zoom = (self.camera_zoom - self.input.wheel_delta).clamp(-2.0, 12.0);

        let pose = self.flight.pose();
        self.camera
            .follow(&pose, self.flight.camera_distance() + self.camera_zoom);
        self.renderer.update_camera(&self.camera);

        let plane_model = Mat4::from_rotation_translation(pose.orientation, pose.position)
            * Mat4::from_scale(Vec3::splat(self.plane_scale));
        self.renderer.update_instance(&self.plane_instance, plane_model);

        let mut draws: Vec<(&MeshBuffer, &ModelInstance)> =
            Vec::with_capacity(self.terrain_instances.len() + 1);
        for (i, instance) in self.terrain_instances.iter().enumerate() {
            let mesh = match (&self.city_mesh, self.city_block_index) {
                (Some(city), Some(center)) if center == i => city,
                _ => &self.base_mesh,
            };
            draws.push((mesh, instance));
        }
        draws.push((&self.plane_mesh, &self.plane_instance));

        if let Err(err) = self.renderer.render(&draws) {
            tracing::error!(%err, "render failed");
        }

        self.input.begin_frame();
        GameAction::Continue
    }
}
