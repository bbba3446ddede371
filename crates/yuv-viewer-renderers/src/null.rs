use yuv_viewer_codecs::PixelLayout;

use crate::{check_buffer, FrameSink, RenderError};

/// Accepts and discards every frame.
pub struct NullSink {
    layout: PixelLayout,
}

impl NullSink {
    pub fn new(layout: PixelLayout) -> Self {
        Self { layout }
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new(PixelLayout::Argb32)
    }
}

impl FrameSink for NullSink {
    fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn present(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<(), RenderError> {
        check_buffer(pixels, width, height, channels)
    }
}
