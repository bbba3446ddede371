use clap::{CommandFactory, Parser};
use log::error;
use yuv_viewer::{
    codecs::PixelLayout,
    error::DropReason,
    render::{dump::RawFrameDumper, null::NullSink},
};

use crate::{
    command_line::{CommandLineViewerOptions, SinkChoice, ViewerConfiguration},
    error::ViewerError,
    pipeline::{build_pipeline, run_pipeline},
};

mod command_line;
mod error;
mod pipeline;
mod types;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = CommandLineViewerOptions::parse();
    let configuration = match options.configuration() {
        Some(configuration) => configuration,
        None => {
            CommandLineViewerOptions::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    match run(configuration).await {
        Ok(Some(reason)) if !reason.is_termination() => {
            error!("Frame pump stopped: {}", reason);
            std::process::exit(1);
        }
        Ok(_) => Ok(()),
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}

async fn run(configuration: ViewerConfiguration) -> Result<Option<DropReason>, ViewerError> {
    let pipeline = match &configuration.sink {
        SinkChoice::Null => build_pipeline(&configuration, NullSink::new(PixelLayout::Argb32))?,
        SinkChoice::Dump(folder) => build_pipeline(
            &configuration,
            RawFrameDumper::new(folder.clone(), PixelLayout::Rgb)?,
        )?,
        SinkChoice::Window => build_window_pipeline(&configuration)?,
    };

    run_pipeline(pipeline).await
}

#[cfg(feature = "window")]
fn build_window_pipeline(
    configuration: &ViewerConfiguration,
) -> Result<yuv_viewer::pipeline::Pipeline<types::ViewerFrameData>, ViewerError> {
    use yuv_viewer::render::winit::WinitRenderer;

    let title = configuration.file.display().to_string();
    build_pipeline(configuration, WinitRenderer::new(&title))
}

#[cfg(not(feature = "window"))]
fn build_window_pipeline(
    _configuration: &ViewerConfiguration,
) -> Result<yuv_viewer::pipeline::Pipeline<types::ViewerFrameData>, ViewerError> {
    Err(ViewerError::WindowUnavailable)
}
