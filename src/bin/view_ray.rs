//! Interactive first-person view of a grid map.
//!
//! ```bash
//! cargo run --release -- [map.txt] [--threads N] [--fov DEG]
//! ```
//!
//! W/S or ↑/↓ move, A/D strafe, ←/→ turn, PgUp/PgDn look, Space/C rise and
//! crouch, +/- zoom, M toggles the minimap, Esc quits. Moving the pointer
//! turns and looks as well.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use minifb::{Key, MouseMode, Window, WindowOptions};

use yaray_rs::{
    config::{Config, default_threads},
    engine::Engine,
    map::{builtin_room, load_map},
    renderer::Software,
    sim::{Buttons, InputState},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file; the built-in 20×20 room when omitted
    #[arg(value_name = "MAP")]
    map: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 800)]
    height: usize,

    /// Render workers (default: hardware concurrency, 1 = no pool)
    #[arg(long)]
    threads: Option<usize>,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Map units per second
    #[arg(long, default_value_t = 3.0)]
    move_speed: f32,

    /// Degrees per second
    #[arg(long, default_value_t = 180.0)]
    turn_speed: f32,

    /// Radians per pixel of pointer motion
    #[arg(long, default_value_t = 0.003)]
    sensitivity: f32,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    target_fps: usize,
}

impl Opts {
    fn config(&self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            threads: self.threads.unwrap_or_else(default_threads),
            fov: self.fov.to_radians(),
            move_rate: self.move_speed,
            turn_rate: self.turn_speed.to_radians(),
            sensitivity: self.sensitivity,
            ..Config::default()
        }
    }
}

/// Key bindings; either key of a pair works.
const BINDINGS: [(Buttons, Key, Key); 13] = [
    (Buttons::FORWARD, Key::W, Key::Up),
    (Buttons::BACK, Key::S, Key::Down),
    (Buttons::STRAFE_LEFT, Key::A, Key::A),
    (Buttons::STRAFE_RIGHT, Key::D, Key::D),
    (Buttons::TURN_LEFT, Key::Left, Key::Q),
    (Buttons::TURN_RIGHT, Key::Right, Key::E),
    (Buttons::LOOK_UP, Key::PageUp, Key::PageUp),
    (Buttons::LOOK_DOWN, Key::PageDown, Key::PageDown),
    (Buttons::RISE, Key::Space, Key::Space),
    (Buttons::CROUCH, Key::C, Key::LeftCtrl),
    (Buttons::ZOOM_IN, Key::Equal, Key::NumPadPlus),
    (Buttons::ZOOM_OUT, Key::Minus, Key::NumPadMinus),
    (Buttons::MINIMAP, Key::M, Key::Tab),
];

fn read_buttons(win: &Window) -> Buttons {
    BINDINGS
        .iter()
        .filter(|&&(_, a, b)| win.is_key_down(a) || win.is_key_down(b))
        .fold(Buttons::empty(), |acc, &(button, _, _)| acc | button)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let map = match &opts.map {
        Some(path) => load_map(path).with_context(|| format!("loading map {}", path.display()))?,
        None => builtin_room().context("loading built-in map")?,
    };

    let mut engine =
        Engine::new(Software::default(), map, opts.config()).context("invalid settings")?;
    let (w, h) = (engine.config.width, engine.config.height);

    let mut win = Window::new("yaray - grid ray caster", w, h, WindowOptions::default())?;
    win.set_target_fps(opts.target_fps);

    let mut input = InputState::default();
    input.reset();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last
    let mut last_frame = Instant::now();

    loop {
        /* --------------- poll ------------------------------------------- */
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        let pointer = win
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Vec2::new(x, y));
        let quit = !win.is_open() || win.is_key_down(Key::Escape);
        input.update(read_buttons(&win), pointer, quit);
        if input.quit {
            break;
        }

        /* --------------- simulate + draw -------------------------------- */
        engine.step(&input, dt);

        let t0 = Instant::now(); // ┌─ render timer start
        let mut presented = Ok(());
        engine.render_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(fb, w, h);
        });
        presented.context("presenting frame")?;

        // ─────────── report every ~3 s ─────────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            println!(
                "avg render: {:.2} ms  ({:.1} FPS, {} slices)",
                avg_ms,
                fps,
                engine.scheduler().slices()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
