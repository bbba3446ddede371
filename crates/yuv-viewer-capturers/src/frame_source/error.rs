use std::io;

use thiserror::Error;
use yuv_viewer_core::error::DropReason;

use super::header::StreamFrameHeader;

#[derive(Error, Debug)]
pub enum FrameSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("File size is {actual} bytes, {expected} expected for the given resolution")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Invalid frame geometry {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("Invalid frame header {0:?}")]
    InvalidHeader(StreamFrameHeader),

    #[error("End of stream")]
    EndOfStream,

    #[error("Stream read error: {0}")]
    Stream(#[source] io::Error),

    #[error("Truncated payload: {read} of {expected} bytes available")]
    TruncatedPayload { expected: usize, read: usize },
}

impl FrameSourceError {
    pub fn drop_reason(&self) -> DropReason {
        match self {
            FrameSourceError::EndOfStream => DropReason::EndOfStream,
            FrameSourceError::InvalidHeader(_) => DropReason::InvalidHeader,
            FrameSourceError::TruncatedPayload { .. } => DropReason::TruncatedPayload,
            FrameSourceError::Io(_)
            | FrameSourceError::Stream(_)
            | FrameSourceError::SizeMismatch { .. }
            | FrameSourceError::InvalidGeometry { .. } => DropReason::StreamError,
        }
    }
}
