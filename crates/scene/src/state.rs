use glam::{UVec2, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tinytown_common::{Cell, TownConfig};
use tinytown_input::Action;
use tinytown_layout::{BlockContent, BlockGrid, BlockPlan, HeightSampler};
use tinytown_render::{DrawSink, TextureFlag};
use tinytown_traffic::TrafficController;

use crate::camera::{CameraMode, CameraView, FlyCamera, follow_view, orbit_view, projection};
use crate::compose::{SUN_DIRECTION, draw_block, draw_ground, draw_lane_markings, draw_lot};

/// What the windowing layer should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Everything a frame or an input event touches.
///
/// Built once at startup and owned by the windowing layer for the life of
/// the process. The grid, sampler and fleet are owned here and lent to the
/// per-frame drawing functions.
pub struct SceneState {
    config: TownConfig,
    grid: BlockGrid,
    heights: HeightSampler,
    traffic: TrafficController,
    camera: FlyCamera,
    orbit: bool,
    orbit_running: bool,
    follow: bool,
    orbit_clock: u64,
    frames: u64,
    viewport: UVec2,
}

impl SceneState {
    /// Lay out the town and start the fleet. The config is trusted; callers
    /// loading user files validate it first.
    pub fn new(config: TownConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let grid = BlockGrid::from_config(&config);
        let heights = HeightSampler::new(config.height_samples, config.height_range, &mut rng);
        let mut traffic = TrafficController::from_config(&config, rng);
        traffic.start_cars();
        tracing::info!(
            blocks = grid.cell_count(),
            vehicles = traffic.len(),
            seed = config.seed,
            "scene constructed"
        );

        let viewport = UVec2::new(config.viewport_width, config.viewport_height);
        Self {
            config,
            grid,
            heights,
            traffic,
            camera: FlyCamera::default(),
            orbit: false,
            orbit_running: true,
            follow: false,
            orbit_clock: 0,
            frames: 0,
            viewport,
        }
    }

    pub fn config(&self) -> &TownConfig {
        &self.config
    }

    pub fn traffic(&self) -> &TrafficController {
        &self.traffic
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    pub fn orbit_running(&self) -> bool {
        self.orbit_running
    }

    pub fn mode(&self) -> CameraMode {
        if self.orbit {
            CameraMode::Orbit
        } else if self.follow {
            CameraMode::Follow
        } else {
            CameraMode::Free
        }
    }

    /// Every cell with its content, in grid order. Works on copies of the
    /// enumerators, so the scene's own cursors are untouched.
    pub fn layout(&self) -> Vec<(Cell, BlockContent)> {
        let mut grid = self.grid.clone();
        let mut heights = self.heights.clone();
        BlockPlan::new(&mut grid, &mut heights).collect()
    }

    /// The view for the current mode. Follow mode with an empty fleet falls
    /// back to the free camera.
    pub fn view(&self) -> CameraView {
        match self.mode() {
            CameraMode::Orbit => orbit_view(
                self.orbit_clock,
                self.config.plane_width as f32,
                self.config.plane_height as f32,
            ),
            CameraMode::Follow => match self.traffic.lead() {
                Some(lead) => follow_view(lead.position(), lead.heading().view_direction()),
                None => self.camera.view(),
            },
            CameraMode::Free => self.camera.view(),
        }
    }

    /// Projection for the current viewport.
    pub fn projection(&self) -> glam::Mat4 {
        let aspect = self.viewport.x.max(1) as f32 / self.viewport.y.max(1) as f32;
        projection(aspect)
    }

    /// Draw one frame into `sink`, then advance the fleet one tick.
    ///
    /// Returns the view the frame was composed for.
    pub fn render_frame<S: DrawSink + ?Sized>(&mut self, sink: &mut S) -> CameraView {
        if self.orbit_running {
            self.orbit_clock += 1;
        }
        let view = self.view();

        sink.set_sun_direction(SUN_DIRECTION);
        sink.set_texture_flag(TextureFlag::Off);
        draw_ground(
            sink,
            self.config.plane_width as f32,
            self.config.plane_height as f32,
        );

        self.grid.reset();
        for cell in self.grid.by_ref() {
            draw_lot(sink, &cell);
        }
        self.grid.reset();
        for cell in self.grid.by_ref() {
            draw_lane_markings(sink, &cell);
        }

        sink.set_texture_flag(TextureFlag::Off);
        for (cell, content) in BlockPlan::new(&mut self.grid, &mut self.heights) {
            draw_block(sink, &cell, content);
        }

        sink.set_texture_flag(TextureFlag::Off);
        self.traffic.draw_all(sink);
        self.traffic.tick_all();

        self.frames += 1;
        tracing::trace!(frame = self.frames, mode = ?self.mode(), "frame composed");
        view
    }

    /// Track a new window size and hand it to the shader.
    pub fn reshape<S: DrawSink + ?Sized>(&mut self, width: u32, height: u32, sink: &mut S) {
        self.viewport = UVec2::new(width, height);
        sink.set_viewport_size(Vec2::new(width as f32, height as f32));
        tracing::debug!(width, height, "viewport reshaped");
    }

    /// Apply one input action between frames.
    pub fn apply(&mut self, action: Action) -> Control {
        match action {
            Action::Quit => return Control::Quit,
            Action::Move(dir) => self.camera.step(dir),
            Action::Look(dir) => self.camera.look(dir),
            Action::LookDelta(delta) => self.camera.rotate(delta),
            Action::ToggleOrbit => {
                self.orbit = !self.orbit;
                self.follow = false;
            }
            Action::ToggleOrbitPause => self.orbit_running = !self.orbit_running,
            Action::ToggleFollow => {
                self.follow = !self.follow;
                self.orbit = false;
            }
            Action::ToggleInspector => {}
        }
        tracing::debug!(?action, mode = ?self.mode(), "input applied");
        Control::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinytown_input::{LookDir, MoveDir};
    use tinytown_render::RecordingSink;

    fn scene() -> SceneState {
        SceneState::new(TownConfig::default())
    }

    #[test]
    fn new_scene_starts_free_with_fleet_heading_up() {
        let s = scene();
        assert_eq!(s.mode(), CameraMode::Free);
        assert!(s.orbit_running());
        assert_eq!(s.traffic().len(), 40);
        assert_eq!(s.viewport(), UVec2::new(800, 600));
    }

    #[test]
    fn orbit_and_follow_clear_each_other() {
        let mut s = scene();
        s.apply(Action::ToggleOrbit);
        assert_eq!(s.mode(), CameraMode::Orbit);
        s.apply(Action::ToggleFollow);
        assert_eq!(s.mode(), CameraMode::Follow);
        s.apply(Action::ToggleOrbit);
        assert_eq!(s.mode(), CameraMode::Orbit);
        s.apply(Action::ToggleOrbit);
        assert_eq!(s.mode(), CameraMode::Free);
    }

    #[test]
    fn orbit_pause_freezes_orbit_view() {
        let mut s = scene();
        let mut sink = RecordingSink::new();
        s.apply(Action::ToggleOrbit);
        s.apply(Action::ToggleOrbitPause);
        let a = s.render_frame(&mut sink);
        let b = s.render_frame(&mut sink);
        assert_eq!(a, b);
        s.apply(Action::ToggleOrbitPause);
        let c = s.render_frame(&mut sink);
        assert_ne!(b, c);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut s = scene();
        assert_eq!(s.apply(Action::Quit), Control::Quit);
        assert_eq!(s.apply(Action::Look(LookDir::Up)), Control::Continue);
    }

    #[test]
    fn free_camera_moves_only_in_free_view() {
        let mut s = scene();
        let before = s.view();
        s.apply(Action::Move(MoveDir::Rise));
        assert_eq!(s.view().eye.y, before.eye.y + 4.0);
    }

    #[test]
    fn follow_tracks_lead_vehicle() {
        let mut s = scene();
        s.apply(Action::ToggleFollow);
        let lead = s.traffic().vehicles()[0].position();
        let view = s.view();
        assert_eq!(view.eye.x, lead.x);
        assert_eq!(view.eye.z, -lead.y);
        assert_eq!(view.target.z, view.eye.z - 1.0);
    }

    #[test]
    fn reshape_sets_viewport_uniform() {
        let mut s = scene();
        let mut sink = RecordingSink::new();
        s.reshape(1024, 768, &mut sink);
        assert_eq!(s.viewport(), UVec2::new(1024, 768));
        assert_eq!(sink.viewport_size(), Some(Vec2::new(1024.0, 768.0)));
    }

    #[test]
    fn layout_does_not_disturb_frames() {
        let s = scene();
        let a = s.layout();
        let b = s.layout();
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
    }
}
