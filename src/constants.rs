use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame when recording (seconds)

pub const DEFAULT_SLIDE_DURATION_SECS: u32 = 4; // Countdown start value for each slide
pub const DEFAULT_FADE_DELAY_MS: u64 = 500;     // Cross-fade window between slides
pub const TICK_INTERVAL: Duration = Duration::from_secs(1); // Countdown cadence
pub const DEFAULT_FALLBACK_TITLE: &str = "Banner";

pub const DOT_SIZE: f32 = 24.0;          // Inactive dot diameter
pub const ACTIVE_DOT_WIDTH: f32 = 48.0;  // Active dot is a pill
pub const DOT_GAP: f32 = 32.0;           // Space between dots
pub const DOT_BOTTOM_MARGIN: f32 = 40.0; // Distance from the bottom edge
pub const DOT_HIT_PADDING: f32 = 12.0;   // Extra clickable margin around a dot
pub const COUNTDOWN_WIDTH: f32 = 84.0;
pub const COUNTDOWN_HEIGHT: f32 = 44.0;
pub const COUNTDOWN_MARGIN: f32 = 16.0;  // Gap between last dot and countdown pill
pub const EDGE_ZONE_WIDTH: f32 = 160.0;  // Click strip at each side for previous/next

pub const TITLE_FONT_SIZE: i32 = 96;
pub const SUBTITLE_FONT_SIZE: i32 = 40;
pub const COUNTDOWN_FONT_SIZE: i32 = 28;
pub const TEXT_LIFT: f32 = 32.0;         // Text slides up by this much while fading in
