//! Presentation side of the pump. A [`FrameSink`] receives converted pixel buffers and is
//! the only place that knows how (and in which channel layout) they are displayed.

use std::io;

use thiserror::Error;
use yuv_viewer_codecs::PixelLayout;
use yuv_viewer_core::error::DropReason;

pub mod dump;
pub mod null;
pub mod sink;

#[cfg(feature = "window")]
pub mod winit;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Pixel buffer holds {actual} bytes, {expected} expected")]
    BufferSize { expected: usize, actual: usize },

    #[error("Display backend error: {0}")]
    Backend(String),

    #[error("Window closed")]
    WindowClosed,
}

impl RenderError {
    pub fn drop_reason(&self) -> DropReason {
        match self {
            RenderError::WindowClosed => DropReason::WindowClosed,
            _ => DropReason::PresentationError,
        }
    }
}

pub trait FrameSink {
    /// Byte layout, and therefore channel count, the sink expects.
    fn layout(&self) -> PixelLayout;

    fn present(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<(), RenderError>;
}

pub(crate) fn check_buffer(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), RenderError> {
    let expected = width as usize * height as usize * channels;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
