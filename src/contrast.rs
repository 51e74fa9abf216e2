//! Picks a readable text tone by sampling the middle of a slide image,
//! where the title is drawn.

pub const SAMPLE_SIZE: usize = 20;
pub const DARK_LUMINANCE_THRESHOLD: f32 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Light, // light text over a dark image
    Dark,  // dark text over a light image
}

pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Average luminance of the centre patch of an RGBA8 buffer, `None` if the
/// buffer does not match the given dimensions.
pub fn center_luminance(rgba: &[u8], width: usize, height: usize) -> Option<f32> {
    if width == 0 || height == 0 || rgba.len() < width * height * 4 {
        return None;
    }

    let patch_w = SAMPLE_SIZE.min(width);
    let patch_h = SAMPLE_SIZE.min(height);
    let x0 = (width - patch_w) / 2;
    let y0 = (height - patch_h) / 2;

    let mut sum = 0.0;
    for y in y0..y0 + patch_h {
        for x in x0..x0 + patch_w {
            let i = (y * width + x) * 4;
            sum += luminance(rgba[i], rgba[i + 1], rgba[i + 2]);
        }
    }
    Some(sum / (patch_w * patch_h) as f32)
}

/// Unreadable images count as dark, so text defaults to light.
pub fn text_tone(rgba: &[u8], width: usize, height: usize) -> TextTone {
    match center_luminance(rgba, width, height) {
        Some(l) if l >= DARK_LUMINANCE_THRESHOLD => TextTone::Dark,
        _ => TextTone::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
        (0..width * height)
            .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
            .collect()
    }

    #[test]
    fn black_image_gets_light_text() {
        let pixels = solid(64, 64, [0, 0, 0]);
        assert_eq!(text_tone(&pixels, 64, 64), TextTone::Light);
    }

    #[test]
    fn white_image_gets_dark_text() {
        let pixels = solid(64, 64, [255, 255, 255]);
        assert_eq!(text_tone(&pixels, 64, 64), TextTone::Dark);
    }

    #[test]
    fn only_the_centre_is_sampled() {
        // Dark frame, bright 20x20 middle
        let (w, h) = (60, 60);
        let mut pixels = solid(w, h, [10, 10, 10]);
        for y in 20..40 {
            for x in 20..40 {
                let i = (y * w + x) * 4;
                pixels[i..i + 3].copy_from_slice(&[250, 250, 250]);
            }
        }
        assert_eq!(text_tone(&pixels, w, h), TextTone::Dark);
    }

    #[test]
    fn green_weighs_more_than_blue() {
        assert!(luminance(0, 255, 0) > DARK_LUMINANCE_THRESHOLD);
        assert!(luminance(0, 0, 255) < DARK_LUMINANCE_THRESHOLD);
    }

    #[test]
    fn tiny_images_sample_what_exists() {
        let pixels = solid(3, 2, [200, 200, 200]);
        let l = center_luminance(&pixels, 3, 2).unwrap();
        assert!((l - 200.0).abs() < 0.01);
    }

    #[test]
    fn short_buffer_defaults_to_light_text() {
        assert_eq!(center_luminance(&[255; 8], 4, 4), None);
        assert_eq!(text_tone(&[], 0, 0), TextTone::Light);
    }
}
