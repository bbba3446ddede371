use log::info;
use yuv_viewer::{
    buffers::pool::BuffersPool,
    capture::file::{FileFrameCapturer, StreamFrameCapturer},
    codecs::yuv::nv12_to_rgb::NV12ToRGBConverter,
    pipeline::{component::Component, Pipeline},
    processors::ticker::Ticker,
    profilation::{
        loggers::{console::ConsoleAverageStatsLogger, frame_rate::FrameRateLogger},
        time::{add::TimestampAdder, diff::TimestampDiffCalculator},
    },
    error::DropReason,
    render::{sink::SinkRenderer, FrameSink},
    traits::FrameError,
};

use crate::{
    command_line::{SourceMode, ViewerConfiguration},
    error::ViewerError,
    types::{BufferType, Stat, ViewerFrameData},
};

// One frame is in flight at a time, the second slot covers the hand-over.
const POOL_SIZE: usize = 2;

/// Builds the single-component frame pump: tick, read, convert, present, profile.
/// The component halts on the first frame that carries a drop reason.
pub fn build_pipeline<T>(
    configuration: &ViewerConfiguration,
    sink: T,
) -> Result<Pipeline<ViewerFrameData>, ViewerError>
where
    T: FrameSink + Send + 'static,
{
    let yuv_pool = BuffersPool::new(BufferType::YuvFrame, POOL_SIZE, 0);
    let rgb_pool = BuffersPool::new(BufferType::RgbFrame, POOL_SIZE, 0);

    let mut converter = NV12ToRGBConverter::new(
        BufferType::YuvFrame,
        BufferType::RgbFrame,
        Stat::Width,
        Stat::Height,
        sink.layout(),
    );
    if configuration.parallel {
        converter = converter.parallel();
    }

    let component = Component::new()
        .append(Ticker::new(configuration.interval))
        .append(TimestampAdder::new(Stat::CaptureTimestamp))
        .append(yuv_pool.borrower())
        .append(rgb_pool.borrower());

    let component = match configuration.mode {
        SourceMode::Fixed { width, height } => {
            info!("Showing {}x{} frame from {:?}", width, height, configuration.file);
            component.append(FileFrameCapturer::open(
                &configuration.file,
                width,
                height,
                BufferType::YuvFrame,
                Stat::Width,
                Stat::Height,
            )?)
        }
        SourceMode::Stream => {
            info!("Playing frame stream from {:?}", configuration.file);
            component.append(StreamFrameCapturer::open(
                &configuration.file,
                BufferType::YuvFrame,
                Stat::Width,
                Stat::Height,
            )?)
        }
    };

    let component = component
        .append(converter)
        .append(SinkRenderer::new(
            sink,
            BufferType::RgbFrame,
            Stat::Width,
            Stat::Height,
        ))
        .append(TimestampDiffCalculator::new(
            Stat::CaptureTimestamp,
            Stat::PresentationDelay,
        ))
        .append(
            ConsoleAverageStatsLogger::new()
                .header("--- Presentation")
                .round_duration(configuration.stats_round)
                .log(Stat::PresentationDelay),
        )
        .append(
            FrameRateLogger::new()
                .header("Viewer")
                .round_duration(configuration.stats_round),
        )
        .append(yuv_pool.redeemer())
        .append(rgb_pool.redeemer())
        .halt_when(|frame_data: &ViewerFrameData| frame_data.get_error().is_some())
        .tag("Viewer");

    Ok(Pipeline::singleton(component).tag("FramePump"))
}

/// Runs the pump until it halts and returns the reason carried by the halting frame.
pub async fn run_pipeline(
    pipeline: Pipeline<ViewerFrameData>,
) -> Result<Option<DropReason>, ViewerError> {
    let mut reason = None;

    for handle in pipeline.run() {
        if let Some(frame_data) = handle.await? {
            reason = reason.or_else(|| frame_data.get_error());
        }
    }

    Ok(reason)
}
