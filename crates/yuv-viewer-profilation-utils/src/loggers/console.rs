use std::{
    collections::HashMap,
    fmt::Debug,
    hash::Hash,
    time::{Duration, Instant},
};

use yuv_viewer_core::traits::{FrameProcessor, FrameProperties};

use async_trait::async_trait;
use log::info;

/// Logs, once per round, the average of the selected frame stats.
pub struct ConsoleAverageStatsLogger<K> {
    header: Option<String>,
    round_duration: Duration,

    current_round_start: Instant,

    logged_stats: HashMap<K, Vec<u128>>,
}

impl<K> Default for ConsoleAverageStatsLogger<K> {
    fn default() -> Self {
        Self {
            header: None,
            round_duration: Duration::from_secs(1),
            current_round_start: Instant::now(),
            logged_stats: HashMap::new(),
        }
    }
}

impl<K> ConsoleAverageStatsLogger<K>
where
    K: Debug + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    // Building functions
    pub fn header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn round_duration(mut self, round_duration: Duration) -> Self {
        self.round_duration = round_duration;
        self
    }

    pub fn log(mut self, key: K) -> Self {
        self.logged_stats.insert(key, Vec::new());
        self
    }

    // Logging functions
    fn average(values: &[u128]) -> Option<u128> {
        if values.is_empty() {
            return None;
        }

        Some(values.iter().sum::<u128>() / values.len() as u128)
    }

    fn print_round_stats(&self) {
        if let Some(header) = self.header.as_ref() {
            info!("{}", header);
        }

        self.logged_stats
            .iter()
            .for_each(|(key, values)| match Self::average(values) {
                Some(avg) => info!("Average {:?}: {}", key, avg),
                None => info!("No {:?} values logged", key),
            });
    }

    fn reset_round(&mut self) {
        self.logged_stats.values_mut().for_each(Vec::clear);
        self.current_round_start = Instant::now();
    }
}

#[async_trait]
impl<F, K> FrameProcessor<F> for ConsoleAverageStatsLogger<K>
where
    K: Copy + Eq + Hash + Send + Debug,
    F: FrameProperties<K, u128> + Send + 'static,
{
    async fn process(&mut self, frame_data: F) -> Option<F> {
        for (key, logged_values) in self.logged_stats.iter_mut() {
            if let Some(value) = frame_data.get(key) {
                logged_values.push(value);
            }
        }

        if self.current_round_start.elapsed() > self.round_duration {
            self.print_round_stats();
            self.reset_round();
        }

        Some(frame_data)
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleAverageStatsLogger;

    #[test]
    fn average_of_logged_values() {
        assert_eq!(ConsoleAverageStatsLogger::<u8>::average(&[10, 20, 40]), Some(23));
        assert_eq!(ConsoleAverageStatsLogger::<u8>::average(&[]), None);
    }
}
