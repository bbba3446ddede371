use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Interval, MissedTickBehavior};

use crate::traits::FrameProcessor;

/// Paces the pump: each frame waits for the next tick of a fixed interval.
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new(tick_interval: u64) -> Self {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_interval));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { interval }
    }
}

#[async_trait]
impl<F: Send + 'static> FrameProcessor<F> for Ticker {
    async fn process(&mut self, frame_data: F) -> Option<F> {
        self.interval.tick().await;
        Some(frame_data)
    }
}
