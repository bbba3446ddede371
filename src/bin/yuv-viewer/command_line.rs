use std::{path::PathBuf, time::Duration};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    version = "0.1.0",
    about = "Shows a raw YUV420 frame, or plays a self-framing YUV420 frame stream"
)]
pub struct CommandLineViewerOptions {
    /// `<file>` plays a frame stream, `<file> <width> <height>` shows a raw frame
    #[clap(multiple_values = true, value_name = "ARGS")]
    positionals: Vec<String>,

    /// Milliseconds between two frames
    #[clap(short, long, default_value = "100")]
    interval: u64,

    /// Dump converted frames into this folder instead of opening a window
    #[clap(long, parse(from_os_str))]
    dump_folder: Option<PathBuf>,

    /// Convert frames without presenting them
    #[clap(long)]
    null_sink: bool,

    /// Convert rows in parallel
    #[clap(long)]
    parallel: bool,

    /// Milliseconds between two statistics reports
    #[clap(long, default_value = "1000")]
    stats_round: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    Fixed { width: u32, height: u32 },
    Stream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkChoice {
    Window,
    Dump(PathBuf),
    Null,
}

#[derive(Debug, Clone)]
pub struct ViewerConfiguration {
    pub file: PathBuf,
    pub mode: SourceMode,
    pub sink: SinkChoice,

    pub interval: u64,
    pub parallel: bool,
    pub stats_round: Duration,
}

impl CommandLineViewerOptions {
    /// `None` when the positional arguments match neither `<file>` nor `<file> <width> <height>`.
    pub fn configuration(&self) -> Option<ViewerConfiguration> {
        let (file, mode) = match self.positionals.as_slice() {
            [file] => (file, SourceMode::Stream),
            [file, width, height] => {
                let width = width.parse().ok()?;
                let height = height.parse().ok()?;
                (file, SourceMode::Fixed { width, height })
            }
            _ => return None,
        };

        let sink = match (&self.dump_folder, self.null_sink) {
            (Some(folder), _) => SinkChoice::Dump(folder.clone()),
            (None, true) => SinkChoice::Null,
            (None, false) => SinkChoice::Window,
        };

        Some(ViewerConfiguration {
            file: PathBuf::from(file),
            mode,
            sink,
            interval: self.interval.max(1),
            parallel: self.parallel,
            stats_round: Duration::from_millis(self.stats_round),
        })
    }
}
