use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};

use banner_rotator::api::ApiClient;
use banner_rotator::config::{self, Config};
use banner_rotator::constants::*;
use banner_rotator::ffmpeg::Recorder;
use banner_rotator::layout::{DotStrip, EdgeZone, edge_zone, to_framebuffer};
use banner_rotator::logging::init_logging;
use banner_rotator::render::{TextureCache, draw_banner};
use banner_rotator::rotator::{AdvancePolicy, BannerView, Rotator};
use banner_rotator::source::source_for_location;

const LOAD_WAIT_BEFORE_RECORDING: Duration = Duration::from_secs(15);

#[derive(Parser, Debug)]
#[command(version, about = "Rotating promotional banner")]
struct Args {
    /// Slide source: JSON manifest, image directory, or http(s) endpoint
    source: Option<String>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Title shown while there are no slides
    #[arg(long)]
    fallback_title: Option<String>,

    /// Seconds each slide stays up
    #[arg(long)]
    duration: Option<u32>,

    /// How the next slide is chosen
    #[arg(long, value_enum)]
    policy: Option<AdvancePolicy>,

    /// Restart the countdown when a navigation dot is clicked
    #[arg(long)]
    reset_on_jump: bool,

    /// Freeze the countdown while the pointer is over the banner
    #[arg(long)]
    pause_on_hover: bool,

    /// Leave the subtitle line empty when a slide has none
    #[arg(long)]
    no_subtitle_fallback: bool,

    /// Bearer token for the slide API
    #[arg(long)]
    token: Option<String>,

    /// Record an mp4 instead of running interactively
    #[arg(long)]
    record: Option<PathBuf>,

    /// Length of the recording
    #[arg(long, default_value_t = 30)]
    record_secs: u32,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_settings(args: &Args) -> Result<Config> {
    let mut settings = match &args.config {
        Some(path) => config::load_from_path(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?,
        None => config::load().context("Failed to read settings")?,
    };

    // Command line wins over the settings file
    if let Some(source) = &args.source {
        settings.source = Some(source.clone());
    }
    if let Some(token) = &args.token {
        settings.api_token = Some(token.clone());
    }
    if let Some(title) = &args.fallback_title {
        settings.rotator.fallback_title = title.clone();
    }
    if let Some(duration) = args.duration {
        settings.rotator.slide_duration_secs = duration;
    }
    if let Some(policy) = args.policy {
        settings.rotator.advance_policy = policy;
    }
    settings.rotator.reset_countdown_on_jump |= args.reset_on_jump;
    settings.rotator.pause_on_hover |= args.pause_on_hover;
    if args.no_subtitle_fallback {
        settings.rotator.subtitle_fallback = false;
    }

    settings.validate()?;
    Ok(settings)
}

/// Dot under the pointer, if the banner is showing navigation.
fn dot_under(rotator: &Rotator, pointer: Vector2) -> Option<usize> {
    match rotator.view() {
        BannerView::Slide(view) if view.shows_navigation() => {
            DotStrip::new(view.count, view.index, RENDER_WIDTH as f32, RENDER_HEIGHT as f32).hit(pointer)
        }
        _ => None,
    }
}

/// What a click at `pointer` asks for: a dot first, then the side strips.
fn handle_click(rotator: &mut Rotator, pointer: Vector2) {
    let result = match dot_under(rotator, pointer) {
        Some(index) => rotator.jump_to(index),
        None => match edge_zone(pointer, RENDER_WIDTH as f32) {
            Some(EdgeZone::Previous) => rotator.previous(),
            Some(EdgeZone::Next) => rotator.next(),
            None => Ok(()),
        },
    };
    if let Err(e) = result {
        warn!("Ignoring click: {}", e);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = load_settings(&args)?;
    let client = ApiClient::new(settings.api_token.clone()).context("Failed to create HTTP client")?;
    let source = source_for_location(settings.source.as_deref(), &client);

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Banner Rotator")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut cache = TextureCache::new(&mut rl, &thread, client, settings.placeholder_image.as_deref())
        .map_err(|e| anyhow!(e))?;

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("Failed to create render texture: {}", e))?;

    let mut rotator = Rotator::mount(source, settings.rotator.clone());

    // Start ffmpeg process and connect pipes so we can send rendered frames
    let mut recorder = match &args.record {
        Some(path) => {
            if !rotator.block_until_loaded(LOAD_WAIT_BEFORE_RECORDING) {
                warn!("Slides still loading, recording the loading banner");
            }
            Some(Recorder::start(RENDER_WIDTH, RENDER_HEIGHT, FPS, path)?)
        }
        None => None,
    };
    let frame_budget = args.record_secs.saturating_mul(FPS);
    let mut frames_written = 0;
    let mut artwork_requested = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        // Recording uses a fixed step so the video runs at real speed
        let dt = if recorder.is_some() { FRAME_TIME } else { rl.get_frame_time() };

        // --- Input ---
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let pointer = to_framebuffer(rl.get_mouse_position(), screen_width, screen_height);

        rotator.set_hovered(recorder.is_none() && rl.is_cursor_on_screen());
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            handle_click(&mut rotator, pointer);
        }
        let stepped = if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            rotator.previous()
        } else if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            rotator.next()
        } else {
            Ok(())
        };
        if let Err(e) = stepped {
            warn!("Ignoring arrow key: {}", e);
        }

        // --- Update ---
        rotator.advance(Duration::from_secs_f32(dt));

        if !artwork_requested && !rotator.slides().is_empty() {
            cache.request_all(rotator.slides().iter().map(|s| s.image_url.as_str()));
            artwork_requested = true;
        }
        cache.update(&mut rl, &thread);

        // --- Render into the fixed size framebuffer ---
        let view = rotator.view();
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            draw_banner(&mut d, &view, &cache);
        });

        // Draw the framebuffer to the window, flipped (render textures are bottom-up)
        let mut d2 = rl.begin_drawing(&thread);
        d2.clear_background(Color::BLACK);
        d2.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, screen_width, screen_height),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d2);

        if let Some(recorder) = recorder.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| anyhow!("Failed to read back framebuffer: {}", e))?;
            recorder.write(&image)?;
            frames_written += 1;
            if frames_written >= frame_budget {
                info!("Recorded {} frames", frames_written);
                break;
            }
        }
    } // End main loop

    rotator.unmount();
    drop(recorder);
    Ok(())
}
