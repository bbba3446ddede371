use std::{fs::File, io::Read, path::Path};

use bytes::BytesMut;
use log::{debug, info};
use yuv_viewer_codecs::{yuv420_frame_size, PlanarYUVFrame};

use super::error::FrameSourceError;

/// A single frame of known geometry, read once from a file holding exactly that frame.
#[derive(Debug)]
pub struct FixedFrameSource {
    width: u32,
    height: u32,
    buffer: BytesMut,
}

impl FixedFrameSource {
    /// Fails with [`FrameSourceError::SizeMismatch`] before reading any pixel data when the
    /// file length differs from `width * height * 3 / 2`.
    pub fn open<P: AsRef<Path>>(
        path: P,
        width: u32,
        height: u32,
    ) -> Result<Self, FrameSourceError> {
        let expected = yuv420_frame_size(width, height)
            .ok_or(FrameSourceError::InvalidGeometry { width, height })?;

        let mut file = File::open(path.as_ref())?;

        let actual = file.metadata()?.len();
        if actual != expected as u64 {
            return Err(FrameSourceError::SizeMismatch {
                expected: expected as u64,
                actual,
            });
        }

        debug!("Buffer create {}x{} ({} bytes)", width, height, expected);
        let mut buffer = BytesMut::with_capacity(expected);
        buffer.resize(expected, 0);

        file.read_exact(&mut buffer)?;

        info!(
            "Loaded {}x{} frame from {}",
            width,
            height,
            path.as_ref().display()
        );

        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn frame(&self) -> Option<PlanarYUVFrame<'_>> {
        PlanarYUVFrame::new(&self.buffer, self.width, self.height)
    }
}
