use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use anyhow::{Context, Result};
use raylib::prelude::*;
use tracing::{info, warn};

use crate::texture_loader::rgba_pixels;

/// Pipes raw RGBA frames into an `ffmpeg` child producing an H.264 file.
pub struct Recorder {
    process: Child,
    stdin: Option<ChildStdin>,
}

impl Recorder {
    pub fn start(width: i32, height: i32, fps: u32, video_path: &Path) -> Result<Recorder> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(video_path)
            .spawn()
            .context("Failed to start ffmpeg process")?;
        let stdin = process.stdin.take().context("Failed to open ffmpeg stdin")?;
        info!("Recording to {}", video_path.display());
        Ok(Recorder { process, stdin: Some(stdin) })
    }

    /// Write one frame read back from a render texture.
    pub fn write(&mut self, image: &Image) -> Result<()> {
        let stdin = self.stdin.as_mut().context("ffmpeg stdin already closed")?;
        let pixels = rgba_pixels(image);
        let row = image.width().max(0) as usize * 4; // 4 bytes per pixel (RGBA)
        if row == 0 {
            return Ok(());
        }

        // Render textures come back bottom-up, ffmpeg wants top-down.
        for line in pixels.chunks_exact(row).rev() {
            stdin.write_all(line).context("Failed to write to ffmpeg stdin")?;
        }
        Ok(())
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        // Close stdin pipe and wait for ffmpeg to finish
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!("Recording finished"),
            Ok(status) => warn!("ffmpeg exited with {}", status),
            Err(e) => warn!("Failed to wait for ffmpeg process: {}", e),
        }
    }
}
