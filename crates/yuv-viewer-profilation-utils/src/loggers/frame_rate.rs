use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::info;
use yuv_viewer_core::traits::FrameProcessor;

/// Periodically reports how many frames per second pass through it.
pub struct FrameRateLogger {
    header: Option<String>,
    round_duration: Duration,

    current_round_start: Instant,
    frames: u64,
}

impl Default for FrameRateLogger {
    fn default() -> Self {
        Self {
            header: None,
            round_duration: Duration::from_secs(1),
            current_round_start: Instant::now(),
            frames: 0,
        }
    }
}

impl FrameRateLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn round_duration(mut self, round_duration: Duration) -> Self {
        self.round_duration = round_duration;
        self
    }

    /// Counts one frame seen at `now`; returns the frame rate when it closes a round.
    pub fn record(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.current_round_start);
        if elapsed < self.round_duration {
            return None;
        }

        let fps = self.frames as f64 / elapsed.as_secs_f64();

        self.frames = 0;
        self.current_round_start = now;

        Some(fps)
    }

    fn report(&self, fps: f64) -> String {
        match self.header.as_ref() {
            Some(header) => format!("[{}] {:.2} FPS", header, fps),
            None => format!("{:.2} FPS", fps),
        }
    }
}

#[async_trait]
impl<F: Send + 'static> FrameProcessor<F> for FrameRateLogger {
    async fn process(&mut self, frame_data: F) -> Option<F> {
        if let Some(fps) = self.record(Instant::now()) {
            info!("{}", self.report(fps));
        }

        Some(frame_data)
    }
}
