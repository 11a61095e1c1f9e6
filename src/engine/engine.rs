use crate::{
    config::{Config, ConfigError, MAX_FRAME_TIME},
    engine::{
        caster::horizon_row,
        projection::Projection,
        scheduler::{FrameScheduler, FrameSnapshot},
    },
    map::LoadedMap,
    renderer::{Renderer, Rgba, overlay::draw_minimap},
    sim::{Buttons, InputState, player_input, slide_move},
    world::{Camera, World},
};

/// Frames between two pose reports in the log.
const POSE_REPORT_EVERY: u64 = 30;

/// One running session: the world, the player and everything needed to turn
/// them into pixels.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub world: World,
    pub camera: Camera,
    pub projection: Projection,
    pub config: Config,
    pub show_minimap: bool,
    scheduler: FrameScheduler,
    frame: u64,
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, map: LoadedMap, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = map.camera(config.fov);
        let projection = Projection::new(config.width, config.height, camera.fov());
        let scheduler = FrameScheduler::new_or_synchronous(config.threads);

        Ok(Self {
            renderer,
            world: map.world,
            camera,
            projection,
            config,
            show_minimap: false,
            scheduler,
            frame: 0,
        })
    }

    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    #[inline(always)]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Apply one frame of input and move the camera.
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_TIME]` so a stall can never carry
    /// the camera more than one cell.
    pub fn step(&mut self, input: &InputState, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_TIME)
        } else {
            0.0
        };

        if input.pressed.contains(Buttons::MINIMAP) {
            self.show_minimap = !self.show_minimap;
        }

        let steer = player_input(&mut self.camera, input, &self.config, dt);
        if steer.fov_changed {
            self.projection.set_fov(self.camera.fov());
        }

        let moved = slide_move(
            &self.world.grid,
            self.camera.pos,
            steer.movement,
            self.config.move_rate,
            dt,
        );
        self.camera.pos = moved.pos;

        self.frame += 1;
        if self.frame % POSE_REPORT_EVERY == 0 {
            log::debug!(
                "frame {}: pos ({:.2}, {:.2}) facing {:.1}° pitch {:.1}° height {:.2}",
                self.frame,
                self.camera.pos.x,
                self.camera.pos.y,
                self.camera.direction().to_degrees(),
                self.camera.pitch().to_degrees(),
                self.camera.height()
            );
        }
    }

    /// Draw the current state and hand the finished frame to `submit`.
    pub fn render_frame(&mut self, submit: impl FnOnce(&[Rgba], usize, usize)) {
        let (w, h) = (self.projection.plane_width, self.projection.plane_height);
        self.renderer.begin_frame(w, h);

        // background: walls only cover part of each column
        let horizon = horizon_row(&self.camera, &self.projection);
        let palette = &self.world.palette;
        self.renderer
            .fill_rectangle(0, 0, w as i32, horizon, palette.ceiling);
        self.renderer
            .fill_rectangle(0, horizon, w as i32, h as i32 - horizon, palette.floor);

        let frame = FrameSnapshot {
            world: &self.world,
            camera: self.camera,
            projection: self.projection,
        };
        self.scheduler.render(&mut self.renderer, &frame);

        if self.show_minimap {
            draw_minimap(&mut self.renderer, &self.world, &self.camera, w, h);
        }

        self.renderer.end_frame(submit);
    }
}
