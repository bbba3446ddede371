use bytes::{Buf, BufMut};
use yuv_viewer_codecs::yuv420_frame_size;

pub const FRAME_MAGIC: u32 = 0x1234CCCC;

/// Header preceding every record of a self-framing stream: four host-order `u32`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFrameHeader {
    pub magic: u32,
    pub width: u32,
    pub height: u32,
    pub size: u32,
}

impl StreamFrameHeader {
    pub const LEN: usize = 16;

    pub fn new(width: u32, height: u32) -> Option<Self> {
        let size = u32::try_from(yuv420_frame_size(width, height)?).ok()?;

        Some(Self {
            magic: FRAME_MAGIC,
            width,
            height,
            size,
        })
    }

    pub fn parse(mut raw: &[u8]) -> Option<Self> {
        if raw.len() < Self::LEN {
            return None;
        }

        Some(Self {
            magic: raw.get_u32_ne(),
            width: raw.get_u32_ne(),
            height: raw.get_u32_ne(),
            size: raw.get_u32_ne(),
        })
    }

    pub fn encode<B: BufMut>(&self, output: &mut B) {
        output.put_u32_ne(self.magic);
        output.put_u32_ne(self.width);
        output.put_u32_ne(self.height);
        output.put_u32_ne(self.size);
    }

    /// Magic must match and `size` must be the YUV420 size of an even, non-empty geometry.
    pub fn is_valid(&self) -> bool {
        self.magic == FRAME_MAGIC
            && yuv420_frame_size(self.width, self.height) == Some(self.size as usize)
    }

    pub fn payload_size(&self) -> usize {
        self.size as usize
    }
}
