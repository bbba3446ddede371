use std::{
    fmt::Debug,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use async_trait::async_trait;
use log::{error, info};
use yuv_viewer_buffer_utils::BytesMut;
use yuv_viewer_codecs::PlanarYUVFrame;
use yuv_viewer_core::{
    error::DropReason,
    traits::{FrameError, FrameProcessor, FrameProperties, PullableFrameProperties},
};

use crate::frame_source::{
    error::FrameSourceError, fixed::FixedFrameSource, stream::StreamFrameSource,
};

fn deliver<F, K, S>(
    frame_data: &mut F,
    frame: &PlanarYUVFrame,
    buffer_key: K,
    width_key: S,
    height_key: S,
) where
    F: PullableFrameProperties<K, BytesMut> + FrameProperties<S, u128>,
{
    let mut buffer = frame_data.pull(&buffer_key).unwrap_or_default();
    buffer.clear();
    buffer.extend_from_slice(frame.luma());
    buffer.extend_from_slice(frame.chroma());
    frame_data.push(buffer_key, buffer);

    frame_data.set(width_key, frame.width() as u128);
    frame_data.set(height_key, frame.height() as u128);
}

fn report<F: FrameError<DropReason>>(frame_data: &mut F, err: &FrameSourceError) {
    match err {
        FrameSourceError::EndOfStream => info!("No more frames to extract"),
        err => error!("Read file fail: {}", err),
    }

    frame_data.report_error(err.drop_reason());
}

/// Delivers the single static frame of a [`FixedFrameSource`] on every pass.
pub struct FileFrameCapturer<K, S> {
    source: FixedFrameSource,

    buffer_key: K,
    width_key: S,
    height_key: S,
}

impl<K, S> FileFrameCapturer<K, S> {
    pub fn new(source: FixedFrameSource, buffer_key: K, width_key: S, height_key: S) -> Self {
        Self {
            source,
            buffer_key,
            width_key,
            height_key,
        }
    }

    pub fn open<P: AsRef<Path>>(
        path: P,
        width: u32,
        height: u32,
        buffer_key: K,
        width_key: S,
        height_key: S,
    ) -> Result<Self, FrameSourceError> {
        let source = FixedFrameSource::open(path, width, height)?;
        Ok(Self::new(source, buffer_key, width_key, height_key))
    }
}

#[async_trait]
impl<F, K, S> FrameProcessor<F> for FileFrameCapturer<K, S>
where
    K: Copy + Send,
    S: Copy + Send,
    F: PullableFrameProperties<K, BytesMut>
        + FrameProperties<S, u128>
        + FrameError<DropReason>
        + Send
        + 'static,
{
    async fn process(&mut self, mut frame_data: F) -> Option<F> {
        match self.source.frame() {
            Some(frame) => deliver(
                &mut frame_data,
                &frame,
                self.buffer_key,
                self.width_key,
                self.height_key,
            ),
            None => {
                error!("Static frame does not match its geometry");
                frame_data.report_error(DropReason::InvalidFrameSize);
            }
        }

        Some(frame_data)
    }
}

/// Advances a [`StreamFrameSource`] by one record on every pass.
pub struct StreamFrameCapturer<K, S, R> {
    source: StreamFrameSource<R>,

    buffer_key: K,
    width_key: S,
    height_key: S,
}

impl<K, S, R> StreamFrameCapturer<K, S, R> {
    pub fn new(source: StreamFrameSource<R>, buffer_key: K, width_key: S, height_key: S) -> Self {
        Self {
            source,
            buffer_key,
            width_key,
            height_key,
        }
    }
}

impl<K, S> StreamFrameCapturer<K, S, BufReader<File>> {
    pub fn open<P: AsRef<Path>>(
        path: P,
        buffer_key: K,
        width_key: S,
        height_key: S,
    ) -> Result<Self, FrameSourceError> {
        let source = StreamFrameSource::open(path)?;
        Ok(Self::new(source, buffer_key, width_key, height_key))
    }
}

#[async_trait]
impl<F, K, S, R> FrameProcessor<F> for StreamFrameCapturer<K, S, R>
where
    K: Copy + Debug + Send,
    S: Copy + Send,
    R: Read + Send,
    F: PullableFrameProperties<K, BytesMut>
        + FrameProperties<S, u128>
        + FrameError<DropReason>
        + Send
        + 'static,
{
    async fn process(&mut self, mut frame_data: F) -> Option<F> {
        match self.source.next_frame() {
            Ok(frame) => deliver(
                &mut frame_data,
                &frame,
                self.buffer_key,
                self.width_key,
                self.height_key,
            ),
            Err(err) => report(&mut frame_data, &err),
        }

        Some(frame_data)
    }
}
