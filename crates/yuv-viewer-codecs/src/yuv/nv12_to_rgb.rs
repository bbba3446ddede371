use std::fmt::Debug;

use async_trait::async_trait;
use log::debug;
use yuv_viewer_buffer_utils::BytesMut;
use yuv_viewer_core::{
    error::DropReason,
    traits::{FrameError, FrameProcessor, FrameProperties, PullableFrameProperties},
};

use crate::frame::{PixelLayout, PlanarYUVFrame, RGBFrame};

use super::raster::{convert_into, convert_parallel_into};

/// Converts the frame's YUV420 buffer into presentation bytes in the RGB buffer slot.
///
/// The converted pixels live in an internal [`RGBFrame`] that is only reallocated when the
/// geometry changes. The RGB buffer is taken from the frame when present (e.g. borrowed
/// from a pool) and allocated otherwise.
pub struct NV12ToRGBConverter<K, S> {
    yuv_buffer_key: K,
    rgb_buffer_key: K,

    width_key: S,
    height_key: S,

    layout: PixelLayout,
    parallel: bool,

    frame: Option<RGBFrame>,
}

impl<K, S> NV12ToRGBConverter<K, S> {
    pub fn new(
        yuv_buffer_key: K,
        rgb_buffer_key: K,
        width_key: S,
        height_key: S,
        layout: PixelLayout,
    ) -> Self {
        Self {
            yuv_buffer_key,
            rgb_buffer_key,
            width_key,
            height_key,
            layout,
            parallel: false,
            frame: None,
        }
    }

    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    fn frame_for(&mut self, width: u32, height: u32) -> &mut RGBFrame {
        let layout = self.layout;
        let reusable = matches!(
            &self.frame,
            Some(frame) if frame.width() == width && frame.height() == height
        );

        if !reusable {
            debug!("Buffer create {}x{} ch:{}", width, height, layout.channels());
            self.frame = Some(RGBFrame::new(width, height, layout));
        }

        self.frame.get_or_insert_with(|| RGBFrame::new(width, height, layout))
    }

    fn convert(&mut self, source: &PlanarYUVFrame, output: &mut BytesMut) {
        let (width, height) = (source.width() as usize, source.height() as usize);
        let parallel = self.parallel;
        let frame = self.frame_for(source.width(), source.height());

        let (luma, chroma) = (source.luma(), source.chroma());
        if parallel {
            convert_parallel_into(luma, chroma, width, height, frame.pixels_mut());
        } else {
            convert_into(luma, chroma, width, height, frame.pixels_mut());
        }

        output.clear();
        output.resize(frame.byte_len(), 0);
        frame.write_to(output);
    }
}

fn geometry<F, S>(frame_data: &F, width_key: &S, height_key: &S) -> Option<(u32, u32)>
where
    F: FrameProperties<S, u128>,
{
    let width = u32::try_from(frame_data.get(width_key)?).ok()?;
    let height = u32::try_from(frame_data.get(height_key)?).ok()?;
    Some((width, height))
}

#[async_trait]
impl<F, K, S> FrameProcessor<F> for NV12ToRGBConverter<K, S>
where
    K: Copy + Debug + Send,
    S: Send + Sync,
    F: PullableFrameProperties<K, BytesMut>
        + FrameProperties<S, u128>
        + FrameError<DropReason>
        + Send
        + 'static,
{
    async fn process(&mut self, mut frame_data: F) -> Option<F> {
        let (width, height) = match geometry(&frame_data, &self.width_key, &self.height_key) {
            Some(geometry) => geometry,
            None => {
                log::error!("Frame carries no geometry");
                frame_data.report_error(DropReason::MissingGeometry);
                return Some(frame_data);
            }
        };

        let yuv_buffer = match frame_data.pull(&self.yuv_buffer_key) {
            Some(buffer) => buffer,
            None => {
                log::error!("Missing '{:?}' buffer", self.yuv_buffer_key);
                frame_data.report_error(DropReason::MissingBuffer);
                return Some(frame_data);
            }
        };

        let mut rgb_buffer = frame_data
            .pull(&self.rgb_buffer_key)
            .unwrap_or_default();

        match PlanarYUVFrame::new(&yuv_buffer, width, height) {
            Some(source) => self.convert(&source, &mut rgb_buffer),
            None => {
                log::error!(
                    "'{:?}' buffer holds {} bytes, not a {}x{} frame",
                    self.yuv_buffer_key,
                    yuv_buffer.len(),
                    width,
                    height
                );
                frame_data.report_error(DropReason::InvalidFrameSize);
            }
        }

        frame_data.push(self.yuv_buffer_key, yuv_buffer);
        frame_data.push(self.rgb_buffer_key, rgb_buffer);

        Some(frame_data)
    }
}
