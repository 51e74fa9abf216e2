use raylib::prelude::*;
use crate::constants::*;

/// Navigation strip at the bottom of the banner: one dot per slide, the
/// active one drawn as a wider pill, followed by the countdown pill.
pub struct DotStrip {
    pub dots: Vec<Rectangle>,
    pub countdown: Rectangle,
}

impl DotStrip {
    pub fn new(count: usize, active: usize, width: f32, height: f32) -> Self {
        let dot_width = |i: usize| if i == active { ACTIVE_DOT_WIDTH } else { DOT_SIZE };

        let dots_width: f32 = (0..count).map(dot_width).sum::<f32>()
            + DOT_GAP * count.saturating_sub(1) as f32;
        let total_width = dots_width + COUNTDOWN_MARGIN + COUNTDOWN_WIDTH;

        let mut x = (width - total_width) * 0.5;
        let center_y = height - DOT_BOTTOM_MARGIN - COUNTDOWN_HEIGHT * 0.5;

        let mut dots = Vec::with_capacity(count);
        for i in 0..count {
            let w = dot_width(i);
            dots.push(Rectangle::new(x, center_y - DOT_SIZE * 0.5, w, DOT_SIZE));
            x += w + DOT_GAP;
        }
        // Undo the trailing gap
        if count > 0 {
            x -= DOT_GAP;
        }

        let countdown = Rectangle::new(
            x + COUNTDOWN_MARGIN,
            center_y - COUNTDOWN_HEIGHT * 0.5,
            COUNTDOWN_WIDTH,
            COUNTDOWN_HEIGHT,
        );

        Self { dots, countdown }
    }

    /// Index of the dot under `point`, with a padded hit box.
    pub fn hit(&self, point: Vector2) -> Option<usize> {
        self.dots.iter().position(|dot| {
            point.x >= dot.x - DOT_HIT_PADDING
                && point.x <= dot.x + dot.width + DOT_HIT_PADDING
                && point.y >= dot.y - DOT_HIT_PADDING
                && point.y <= dot.y + dot.height + DOT_HIT_PADDING
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeZone {
    Previous,
    Next,
}

/// Side strip under `point`, if any. Zones never overlap, even on very
/// narrow banners.
pub fn edge_zone(point: Vector2, width: f32) -> Option<EdgeZone> {
    let zone = EDGE_ZONE_WIDTH.min(width * 0.5);
    if point.x < 0.0 || point.x > width {
        None
    } else if point.x < zone {
        Some(EdgeZone::Previous)
    } else if point.x > width - zone {
        Some(EdgeZone::Next)
    } else {
        None
    }
}

/// Map a window-space pointer position into framebuffer space.
pub fn to_framebuffer(point: Vector2, screen_width: f32, screen_height: f32) -> Vector2 {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return point;
    }
    Vector2::new(
        point.x * RENDER_WIDTH as f32 / screen_width,
        point.y * RENDER_HEIGHT as f32 / screen_height,
    )
}

/// Source rectangle that crops `tex_w x tex_h` to fill `dst_w x dst_h`
/// without distortion (CSS `object-fit: cover`).
pub fn cover_source(tex_w: f32, tex_h: f32, dst_w: f32, dst_h: f32) -> Rectangle {
    if tex_w <= 0.0 || tex_h <= 0.0 || dst_w <= 0.0 || dst_h <= 0.0 {
        return Rectangle::new(0.0, 0.0, tex_w.max(0.0), tex_h.max(0.0));
    }
    let scale = (dst_w / tex_w).max(dst_h / tex_h);
    let src_w = dst_w / scale;
    let src_h = dst_h / scale;
    Rectangle::new((tex_w - src_w) * 0.5, (tex_h - src_h) * 0.5, src_w, src_h)
}
