use std::collections::HashMap;
use raylib::prelude::*;
use raylib::core::text::measure_text;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::constants::*;
use crate::contrast::{TextTone, text_tone};
use crate::error::FetchError;
use crate::layout::{DotStrip, cover_source};
use crate::pending::{Pending, Poll};
use crate::rotator::{BannerView, SlideView};
use crate::texture_loader::{ImageBytes, decode_image, placeholder_image, read_image_bytes, rgba_pixels};

const LOADING_BACKGROUND: Color = Color::new(229, 231, 235, 255);
const LOADING_TEXT: Color = Color::new(55, 65, 81, 255);
const FALLBACK_BACKGROUND: Color = Color::new(209, 213, 219, 255);
const DARK_TEXT: Color = Color::new(15, 23, 42, 255);

pub struct Artwork {
    texture: Texture2D,
    tone: TextTone,
}

impl Artwork {
    fn from_image(rl: &mut RaylibHandle, thread: &RaylibThread, image: &Image) -> Result<Self, String> {
        let tone = text_tone(rgba_pixels(image), image.width() as usize, image.height() as usize);
        let texture = rl
            .load_texture_from_image(thread, image)
            .map_err(|e| format!("Failed to create texture: {}", e))?;
        Ok(Self { texture, tone })
    }
}

enum Entry<A = Artwork> {
    Loading(Pending<Result<ImageBytes, FetchError>>),
    Ready(A),
    Failed,
}

/// Decoded image for a finished load, `None` while it is still in flight.
fn settle(poll: Poll<Result<ImageBytes, FetchError>>) -> Option<Result<Image, String>> {
    let outcome = match poll {
        Poll::Waiting => return None,
        Poll::Ready(outcome) => outcome,
        Poll::Lost => Err(FetchError::WorkerLost),
    };
    Some(outcome.map_err(|e| e.to_string()).and_then(|bytes| decode_image(&bytes)))
}

fn lookup<'a, A>(entry: Option<&'a Entry<A>>, placeholder: &'a A) -> Option<&'a A> {
    match entry {
        Some(Entry::Loading(_)) => None,
        Some(Entry::Ready(artwork)) => Some(artwork),
        Some(Entry::Failed) | None => Some(placeholder),
    }
}

/// Slide artwork keyed by image location. Bytes are fetched on worker
/// threads; decoding and GPU upload happen in `update` on the main thread.
pub struct TextureCache {
    client: ApiClient,
    entries: HashMap<String, Entry>,
    placeholder: Artwork,
}

impl TextureCache {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        client: ApiClient,
        placeholder_location: Option<&str>,
    ) -> Result<Self, String> {
        let configured = placeholder_location.and_then(|location| {
            match read_image_bytes(location, &client)
                .map_err(|e| e.to_string())
                .and_then(|bytes| decode_image(&bytes))
            {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Could not load placeholder image {}: {}", location, e);
                    None
                }
            }
        });
        let image = configured.unwrap_or_else(placeholder_image);
        let placeholder = Artwork::from_image(rl, thread, &image)?;

        Ok(Self {
            client,
            entries: HashMap::new(),
            placeholder,
        })
    }

    /// Start loading `location` unless already known.
    pub fn request(&mut self, location: &str) {
        if location.trim().is_empty() || self.entries.contains_key(location) {
            return;
        }
        debug!("Loading artwork {}", location);
        let client = self.client.clone();
        let owned = location.to_string();
        let pending = Pending::spawn("artwork-fetch", move || read_image_bytes(&owned, &client));
        self.entries.insert(location.to_string(), Entry::Loading(pending));
    }

    pub fn request_all<'a>(&mut self, locations: impl IntoIterator<Item = &'a str>) {
        for location in locations {
            self.request(location);
        }
    }

    /// Upload every image whose bytes have arrived.
    pub fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        for (location, entry) in self.entries.iter_mut() {
            let Entry::Loading(pending) = entry else {
                continue;
            };
            let Some(decoded) = settle(pending.poll()) else {
                continue;
            };
            let loaded = decoded.and_then(|image| Artwork::from_image(rl, thread, &image));
            *entry = match loaded {
                Ok(artwork) => {
                    debug!("Artwork ready: {}", location);
                    Entry::Ready(artwork)
                }
                Err(e) => {
                    warn!("Using placeholder for {}: {}", location, e);
                    Entry::Failed
                }
            };
        }
    }

    /// Artwork to draw for `location`: `None` while still loading, the
    /// placeholder when missing or broken.
    pub fn artwork(&self, location: &str) -> Option<&Artwork> {
        lookup(self.entries.get(location), &self.placeholder)
    }
}

fn with_opacity(color: Color, opacity: f32) -> Color {
    let a = (color.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::new(color.r, color.g, color.b, a)
}

fn draw_centered_text(d: &mut RaylibDrawHandle, text: &str, center_y: f32, font_size: i32, color: Color) {
    let width = measure_text(text, font_size);
    let x = (RENDER_WIDTH - width) / 2;
    let y = center_y as i32 - font_size / 2;
    d.draw_text(text, x, y, font_size, color);
}

pub fn draw_banner(d: &mut RaylibDrawHandle, view: &BannerView, cache: &TextureCache) {
    match view {
        BannerView::Unmounted => d.clear_background(Color::BLACK),
        BannerView::Loading => {
            d.clear_background(LOADING_BACKGROUND);
            draw_centered_text(d, "Loading...", RENDER_HEIGHT as f32 * 0.5, SUBTITLE_FONT_SIZE, LOADING_TEXT);
        }
        BannerView::Fallback { title } => {
            d.clear_background(FALLBACK_BACKGROUND);
            draw_centered_text(d, title, RENDER_HEIGHT as f32 * 0.5, TITLE_FONT_SIZE, Color::WHITE);
        }
        BannerView::Slide(slide) => draw_slide(d, slide, cache),
    }
}

fn draw_slide(d: &mut RaylibDrawHandle, view: &SlideView, cache: &TextureCache) {
    let screen_width = RENDER_WIDTH as f32;
    let screen_height = RENDER_HEIGHT as f32;
    d.clear_background(Color::BLACK);

    let artwork = cache.artwork(&view.slide.image_url);
    if let Some(artwork) = artwork {
        let tex = &artwork.texture;
        let source = cover_source(tex.width() as f32, tex.height() as f32, screen_width, screen_height);
        d.draw_texture_pro(
            tex,
            source,
            Rectangle::new(0.0, 0.0, screen_width, screen_height),
            Vector2::new(0.0, 0.0),
            0.0,
            with_opacity(Color::WHITE, view.opacity),
        );
    }

    let tone = artwork.map_or(TextTone::Light, |a| a.tone);
    let (overlay, text_color) = match tone {
        TextTone::Light => (Color::new(0, 0, 0, 115), Color::WHITE),
        TextTone::Dark => (Color::new(255, 255, 255, 90), DARK_TEXT),
    };
    d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, overlay);

    // Text rises into place as it fades in
    let lift = TEXT_LIFT * (1.0 - view.opacity);
    let text_color = with_opacity(text_color, view.opacity);
    let title_y = screen_height * 0.5 - 40.0 + lift;
    draw_centered_text(d, view.heading, title_y, TITLE_FONT_SIZE, text_color);
    if let Some(caption) = view.caption {
        draw_centered_text(d, caption, title_y + 100.0, SUBTITLE_FONT_SIZE, text_color);
    }

    if view.shows_navigation() {
        draw_navigation(d, view);
    }
}

fn draw_navigation(d: &mut RaylibDrawHandle, view: &SlideView) {
    let strip = DotStrip::new(view.count, view.index, RENDER_WIDTH as f32, RENDER_HEIGHT as f32);
    for (i, dot) in strip.dots.iter().enumerate() {
        let color = if i == view.index { Color::WHITE } else { Color::new(255, 255, 255, 128) };
        d.draw_rectangle_rounded(*dot, 1.0, 12, color);
    }

    if let Some(seconds) = view.countdown {
        let pill = strip.countdown;
        d.draw_rectangle_rounded(pill, 0.4, 8, Color::new(0, 0, 0, 77));
        let label = format!("{}s", seconds);
        let width = measure_text(&label, COUNTDOWN_FONT_SIZE);
        d.draw_text(
            &label,
            (pill.x + (pill.width - width as f32) * 0.5) as i32,
            (pill.y + (pill.height - COUNTDOWN_FONT_SIZE as f32) * 0.5) as i32,
            COUNTDOWN_FONT_SIZE,
            Color::WHITE,
        );
    }
}
