//! Offline demo: renders a toggle morph between two strings to PNG frames.
//!
//! ```text
//! morphtext <out-dir> [source] [target] [target-color] [preset.toml]
//! ```

use std::path::{Path, PathBuf};

use morphtext::color::parse_hex;
use morphtext::engine::{
    FrameInput, FrameLoop, FrameOutcome, ManualScheduler, MorphEngine, Side,
    SideMode, Viewport,
};
use morphtext::options::Options;
use morphtext::sampler::FontRasterizer;
use web_time::{Duration, Instant};

/// Simulated display rate.
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
/// Frames to hold each side before toggling.
const HOLD_FRAMES: u32 = 45;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".to_owned()));
    let source = args.next().unwrap_or_else(|| "hello".to_owned());
    let target = args.next().unwrap_or_else(|| "bonjour".to_owned());
    let target_color = args
        .next()
        .and_then(|hex| parse_hex(&hex))
        .unwrap_or([0.55, 0.75, 1.0]);
    let options = match args.next() {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    std::fs::create_dir_all(&out_dir)?;

    let epoch = Instant::now();
    let mut rasterizer = FontRasterizer::new(options.sampler.font_family.clone());
    if !rasterizer.has_family() {
        // Offline rendering: no face will arrive later, so take the fallback.
        log::warn!(
            "font family {:?} not installed, using the serif fallback",
            rasterizer.family()
        );
        rasterizer = rasterizer.accepting_fallback(true);
    }
    let engine = MorphEngine::new(options, SideMode::Pair, rasterizer, epoch);
    let mut frames = FrameLoop::new(engine, ManualScheduler::new());

    let viewport = Viewport::new(640.0, 240.0).with_scale(2.0);
    let mut input = FrameInput::pair(source, target);
    input.target_color = target_color;

    let transition = frames.engine().options().timing.total();
    let cycle = HOLD_FRAMES
        + (transition.as_secs_f32() / FRAME_INTERVAL.as_secs_f32()).ceil() as u32;

    frames.start();
    let mut now = epoch;
    let mut written = 0_u32;
    for index in 0..cycle * 2 {
        if index == cycle {
            input.active_side = Side::Target;
        }
        let Some(handle) = frames.scheduler().pending() else {
            break;
        };
        match frames.on_frame(handle, now, &input, viewport) {
            Some(FrameOutcome::Drawn { .. }) => {
                if let Some(surface) = frames.engine().surface() {
                    let path = out_dir.join(format!("frame_{index:04}.png"));
                    surface.pixmap().save_png(&path)?;
                    written += 1;
                }
            }
            Some(outcome) => log::warn!("frame {index}: {outcome:?}"),
            None => break,
        }
        now += FRAME_INTERVAL;
    }
    frames.stop();

    log::info!(
        "wrote {written} frames to {} ({:.1} fps simulated)",
        out_dir.display(),
        frames.fps()
    );
    Ok(())
}
