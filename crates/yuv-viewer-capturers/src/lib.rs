//! Sources of raw YUV420 frames: a single frame read from a file of known geometry,
//! or a self-framing stream of `(header, payload)` records.

pub mod file;
pub mod frame_source;

pub use frame_source::{
    error::FrameSourceError, fixed::FixedFrameSource, header::StreamFrameHeader,
    stream::StreamFrameSource,
};
