//! view_sw.rs - walk around the built-in portal level in a window.
//!
//! USAGE:
//! ```bash
//! cargo run --release --bin view_sw -- --width 640 --height 400 --scale 2
//! cargo run --release --bin view_sw -- --textures walls.ptex -vv
//! cargo run --release --bin view_sw -- --step-debug   # N: one more sector
//! ```
//!
//! Controls: W/S or ↑/↓ move, A/D strafe, Q/E or ←/→ turn, Esc quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use simplelog::TermLogger;

use portal_rs::{
    assets::TexturePack,
    renderer::{PixelBuffer, RenderConfig, Renderer, RendererExt, software::Software},
    sim::{Buttons, FrameDriver, InputCmd},
    world::{Camera, TextureBank, demo},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Render width in pixels
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Render height in pixels
    #[arg(long, default_value_t = 400)]
    height: usize,

    /// Window magnification (1, 2, 4, 8, 16 or 32)
    #[arg(long, default_value_t = 2)]
    scale: u8,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Portal recursion cap
    #[arg(long, default_value_t = RenderConfig::default().max_depth)]
    max_depth: u32,

    /// Distance fog factor, 0 disables fog
    #[arg(long, default_value_t = RenderConfig::default().fog)]
    fog: f32,

    /// Texture pack replacing the procedural textures
    #[arg(long, value_name = "FILE")]
    textures: Option<PathBuf>,

    /// Draw one sector per frame; N adds one, Backspace starts over
    #[arg(long)]
    step_debug: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_depth: self.max_depth,
            fog: self.fog,
            sector_budget: self.step_debug.then_some(1),
        }
    }

    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    fn window_scale(&self) -> Scale {
        match self.scale {
            0 | 1 => Scale::X1,
            2 => Scale::X2,
            3 | 4 => Scale::X4,
            5..=8 => Scale::X8,
            9..=16 => Scale::X16,
            _ => Scale::X32,
        }
    }
}

const KEYMAP: [(Key, Buttons); 10] = [
    (Key::W, Buttons::FORWARD),
    (Key::Up, Buttons::FORWARD),
    (Key::S, Buttons::BACK),
    (Key::Down, Buttons::BACK),
    (Key::A, Buttons::STRAFE_LEFT),
    (Key::D, Buttons::STRAFE_RIGHT),
    (Key::Q, Buttons::TURN_LEFT),
    (Key::Left, Buttons::TURN_LEFT),
    (Key::E, Buttons::TURN_RIGHT),
    (Key::Right, Buttons::TURN_RIGHT),
];

fn read_buttons(win: &Window) -> Buttons {
    KEYMAP
        .iter()
        .filter(|(key, _)| win.is_key_down(*key))
        .fold(Buttons::empty(), |acc, (_, b)| acc | *b)
}

fn load_bank(opts: &Opts) -> anyhow::Result<TextureBank> {
    match &opts.textures {
        Some(path) => Ok(TexturePack::from_file(path)?.into_bank()?),
        None => Ok(demo::texture_bank()?),
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    TermLogger::init(
        opts.log_level(),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut level = demo::level();
    level.validate()?;
    let bank = load_bank(&opts)?;

    let start_sector = level
        .find_sector(demo::CAMERA_START)
        .unwrap_or(demo::CAMERA_SECTOR);
    let camera = Camera::new(demo::CAMERA_START, demo::CAMERA_YAW, opts.fov, start_sector);
    let mut driver = FrameDriver::new(camera).with_platform(demo::platform());

    log::info!(
        "level: {} vertices, {} sectors, {} textures; start in sector {start_sector}",
        level.vertices.len(),
        level.sectors.len(),
        bank.len()
    );

    let mut renderer = Software::new(opts.render_config());
    let mut fb = PixelBuffer::new(opts.width, opts.height);

    let mut win = Window::new(
        "portal_rs software view",
        opts.width,
        opts.height,
        WindowOptions {
            scale: opts.window_scale(),
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt = t0.duration_since(last_frame).as_secs_f32();
        last_frame = t0;

        if let Some(budget) = renderer.config.sector_budget.as_mut() {
            if win.is_key_pressed(Key::N, KeyRepeat::No) {
                *budget += 1;
                log::info!("sector budget {budget}");
            }
            if win.is_key_pressed(Key::Backspace, KeyRepeat::No) {
                *budget = 1;
            }
        }

        let cmd = InputCmd::from(read_buttons(&win));
        driver.step(dt, cmd, &mut level);

        let stats = renderer.render_frame(&level, &driver.camera, &bank, &mut fb);
        if stats.truncated_by_depth {
            log::debug!("portal depth cap hit at {}", stats.max_depth_reached);
        }

        let mut presented = Ok(());
        renderer.end_frame(&fb, |argb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(argb, w, h);
        });
        presented?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            log::info!(
                "avg frame: {avg_ms:.2} ms ({:.1} FPS), sector {}, {} sectors drawn",
                1000.0 / avg_ms,
                driver.camera.sector,
                stats.sectors_drawn
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
