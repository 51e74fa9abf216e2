//! Rotating promotional banner: slide sources, the rotation state machine,
//! and a raylib front end that draws it.

pub mod api;
pub mod config;
pub mod constants;
pub mod contrast;
pub mod error;
pub mod ffmpeg;
pub mod layout;
pub mod logging;
pub mod pending;
pub mod render;
pub mod rotator;
pub mod slide;
pub mod source;
pub mod state;
pub mod texture_loader;
