use thiserror::Error;
use yuv_viewer::{capture::FrameSourceError, render::RenderError};

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Buffer initial fail: {0}")]
    Source(#[from] FrameSourceError),

    #[error("Unable to set up the presentation sink: {0}")]
    Render(#[from] RenderError),

    #[error("Frame pump task failed: {0}")]
    Pump(#[from] tokio::task::JoinError),

    #[cfg(not(feature = "window"))]
    #[error("This build has no window support, use --dump-folder or --null-sink")]
    WindowUnavailable,
}
