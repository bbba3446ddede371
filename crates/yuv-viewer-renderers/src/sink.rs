use async_trait::async_trait;
use log::{error, info};
use yuv_viewer_buffer_utils::BytesMut;
use yuv_viewer_core::{
    error::DropReason,
    traits::{BorrowFrameProperties, FrameError, FrameProcessor, FrameProperties},
};

use crate::{FrameSink, RenderError};

/// Hands the frame's converted pixel buffer to a [`FrameSink`]. Frames that already carry
/// an error are passed through untouched.
pub struct SinkRenderer<K, S, T> {
    sink: T,

    buffer_key: K,
    width_key: S,
    height_key: S,
}

impl<K, S, T: FrameSink> SinkRenderer<K, S, T> {
    pub fn new(sink: T, buffer_key: K, width_key: S, height_key: S) -> Self {
        Self {
            sink,
            buffer_key,
            width_key,
            height_key,
        }
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }

    fn render<F>(&mut self, frame_data: &F) -> Result<(), RenderError>
    where
        F: BorrowFrameProperties<K, BytesMut> + FrameProperties<S, u128>,
    {
        let geometry = frame_data
            .get(&self.width_key)
            .zip(frame_data.get(&self.height_key))
            .and_then(|(width, height)| {
                Some((u32::try_from(width).ok()?, u32::try_from(height).ok()?))
            });

        let (width, height) = geometry
            .ok_or_else(|| RenderError::Backend("missing frame geometry".to_string()))?;

        let pixels = frame_data
            .get_ref(&self.buffer_key)
            .ok_or_else(|| RenderError::Backend("missing pixel buffer".to_string()))?;

        let channels = self.sink.layout().channels();
        self.sink.present(pixels, width, height, channels)
    }
}

#[async_trait]
impl<F, K, S, T> FrameProcessor<F> for SinkRenderer<K, S, T>
where
    K: Send,
    S: Send,
    T: FrameSink + Send,
    F: BorrowFrameProperties<K, BytesMut>
        + FrameProperties<S, u128>
        + FrameError<DropReason>
        + Send
        + 'static,
{
    async fn process(&mut self, mut frame_data: F) -> Option<F> {
        if frame_data.get_error().is_some() {
            return Some(frame_data);
        }

        if let Err(err) = self.render(&frame_data) {
            match err {
                RenderError::WindowClosed => info!("Window closed"),
                ref err => error!("Unable to present frame: {}", err),
            }

            frame_data.report_error(err.drop_reason());
        }

        Some(frame_data)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use yuv_viewer_buffer_utils::BytesMut;
    use yuv_viewer_codecs::PixelLayout;
    use yuv_viewer_core::{
        error::DropReason,
        traits::{BorrowFrameProperties, FrameError, FrameProcessor, FrameProperties},
    };

    use crate::{dump::RawFrameDumper, null::NullSink};

    use super::SinkRenderer;

    #[derive(Default)]
    struct TestFrameData {
        buffer: Option<BytesMut>,
        stats: HashMap<&'static str, u128>,
        error: Option<DropReason>,
    }

    impl BorrowFrameProperties<(), BytesMut> for TestFrameData {
        fn get_ref(&self, _: &()) -> Option<&BytesMut> {
            self.buffer.as_ref()
        }
    }

    impl FrameProperties<&'static str, u128> for TestFrameData {
        fn set(&mut self, key: &'static str, value: u128) {
            self.stats.insert(key, value);
        }

        fn get(&self, key: &&'static str) -> Option<u128> {
            self.stats.get(key).copied()
        }
    }

    impl FrameError<DropReason> for TestFrameData {
        fn report_error(&mut self, error: DropReason) {
            self.error = Some(error);
        }

        fn get_error(&self) -> Option<DropReason> {
            self.error
        }
    }

    fn frame_data(width: u128, height: u128, bytes: usize) -> TestFrameData {
        let mut frame_data = TestFrameData {
            buffer: Some(BytesMut::from(&vec![0x82; bytes][..])),
            ..Default::default()
        };
        frame_data.set("width", width);
        frame_data.set("height", height);
        frame_data
    }

    #[tokio::test]
    async fn dumper_writes_one_file_per_frame() {
        let folder = tempfile::tempdir().unwrap();
        let dumper = RawFrameDumper::new(folder.path().join("frames"), PixelLayout::Rgb).unwrap();
        let mut renderer = SinkRenderer::new(dumper, (), "width", "height");

        for _ in 0..2 {
            let presented = renderer.process(frame_data(2, 2, 12)).await.unwrap();
            assert!(presented.get_error().is_none());
        }

        assert_eq!(renderer.sink().dumped_frames(), 2);

        let dumped = std::fs::read(folder.path().join("frames").join("000001_2x2.rgb")).unwrap();
        assert_eq!(dumped, vec![0x82; 12]);
    }

    #[tokio::test]
    async fn wrong_sized_buffers_are_reported() {
        let mut renderer =
            SinkRenderer::new(NullSink::new(PixelLayout::Rgba), (), "width", "height");

        let presented = renderer.process(frame_data(2, 2, 12)).await.unwrap();
        assert_eq!(presented.get_error(), Some(DropReason::PresentationError));
    }

    #[tokio::test]
    async fn failed_frames_are_not_presented() {
        let folder = tempfile::tempdir().unwrap();
        let dumper = RawFrameDumper::new(folder.path().to_path_buf(), PixelLayout::Rgba).unwrap();
        let mut renderer = SinkRenderer::new(dumper, (), "width", "height");

        let mut failed = frame_data(2, 2, 16);
        failed.report_error(DropReason::EndOfStream);

        let passed = renderer.process(failed).await.unwrap();
        assert_eq!(passed.get_error(), Some(DropReason::EndOfStream));
        assert_eq!(renderer.sink().dumped_frames(), 0);
    }
}
