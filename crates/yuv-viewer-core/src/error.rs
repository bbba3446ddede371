use thiserror::Error;

/// Reason a frame left the pump without being presented.
#[derive(Error, Debug, Clone, PartialEq, Eq, Copy)]
pub enum DropReason {
    #[error("End of stream")]
    EndOfStream,

    #[error("Stream read error")]
    StreamError,

    #[error("Invalid frame header")]
    InvalidHeader,

    #[error("Truncated frame payload")]
    TruncatedPayload,

    #[error("Missing frame geometry")]
    MissingGeometry,

    #[error("Missing frame buffer")]
    MissingBuffer,

    #[error("Frame buffer does not match its geometry")]
    InvalidFrameSize,

    #[error("Presentation error")]
    PresentationError,

    #[error("Window closed")]
    WindowClosed,
}

impl DropReason {
    /// Whether the reason marks the regular end of the frame sequence rather than a failure.
    pub fn is_termination(&self) -> bool {
        matches!(self, DropReason::EndOfStream | DropReason::WindowClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::DropReason;

    #[test]
    fn only_regular_ends_are_terminations() {
        assert!(DropReason::EndOfStream.is_termination());
        assert!(DropReason::WindowClosed.is_termination());

        assert!(!DropReason::StreamError.is_termination());
        assert!(!DropReason::TruncatedPayload.is_termination());
        assert!(!DropReason::PresentationError.is_termination());
    }
}
