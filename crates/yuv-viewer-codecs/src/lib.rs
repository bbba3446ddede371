//! Conversion of planar YUV420 frames (full-resolution luma followed by interleaved V/U
//! chroma, one pair per 2x2 luma block) into packed 32-bit RGB pixels.

pub mod frame;
pub mod yuv;

pub use frame::{yuv420_frame_size, PixelLayout, PlanarYUVFrame, RGBFrame};
