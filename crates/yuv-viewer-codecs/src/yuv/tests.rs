use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use yuv_viewer_buffer_utils::BytesMut;
use yuv_viewer_core::{
    error::DropReason,
    traits::{FrameError, FrameProcessor, FrameProperties, PullableFrameProperties},
};

use crate::frame::{PixelLayout, PlanarYUVFrame};

use super::{
    nv12_to_rgb::NV12ToRGBConverter,
    raster::{convert, convert_into, convert_parallel_into},
    yuv_to_argb,
};

fn uniform_frame(width: usize, height: usize, luma: u8, chroma: u8) -> Vec<u8> {
    let mut buffer = vec![luma; width * height];
    buffer.resize(width * height * 3 / 2, chroma);
    buffer
}

fn random_frame(rng: &mut StdRng, width: usize, height: usize) -> Vec<u8> {
    (0..width * height * 3 / 2).map(|_| rng.gen()).collect()
}

#[test]
fn black_luma_with_neutral_chroma_is_pure_black() {
    assert_eq!(yuv_to_argb(16, 128, 128), 0xff000000);
    // luma under the offset is clamped to zero
    assert_eq!(yuv_to_argb(0, 128, 128), 0xff000000);
}

#[test]
fn white_luma_is_off_white() {
    // 219 * 1192 = 261048, 261048 >> 10 = 254
    assert_eq!(yuv_to_argb(235, 128, 128), 0xfffefefe);
}

#[test]
fn mid_gray_two_by_two_frame() {
    let buffer = [128, 128, 128, 128, 128, 128];
    let frame = PlanarYUVFrame::new(&buffer, 2, 2).unwrap();

    // 112 * 1192 = 133504, 133504 >> 10 = 130
    let expected = 0xff828282;

    let first = convert(frame.luma(), frame.chroma(), 2, 2, PixelLayout::Argb32);
    let second = convert(frame.luma(), frame.chroma(), 2, 2, PixelLayout::Argb32);

    assert_eq!(first.pixels(), &[expected; 4]);
    assert_eq!(first, second);
}

#[test]
fn chroma_pairs_are_read_as_v_then_u() {
    // full red-difference, neutral blue-difference
    let buffer = [128, 128, 128, 128, 255, 128];
    let frame = PlanarYUVFrame::new(&buffer, 2, 2).unwrap();
    let rgb = convert(frame.luma(), frame.chroma(), 2, 2, PixelLayout::Argb32);

    let expected = yuv_to_argb(128, 128, 255);
    assert_eq!(rgb.pixels(), &[expected; 4]);

    let [_, r, _, b] = expected.to_be_bytes();
    assert!(r > b);
}

#[test]
fn each_chroma_pair_covers_a_two_by_two_block() {
    let (width, height) = (4, 4);
    let mut buffer = vec![100; width * height];
    // block row 0: (v, u) = (10, 20), (30, 40); block row 1: (50, 60), (70, 80)
    buffer.extend_from_slice(&[10, 20, 30, 40, 50, 60, 70, 80]);

    let frame = PlanarYUVFrame::new(&buffer, 4, 4).unwrap();
    let rgb = convert(frame.luma(), frame.chroma(), 4, 4, PixelLayout::Argb32);

    let blocks = [
        [yuv_to_argb(100, 20, 10), yuv_to_argb(100, 40, 30)],
        [yuv_to_argb(100, 60, 50), yuv_to_argb(100, 80, 70)],
    ];

    for row in 0..height {
        for column in 0..width {
            assert_eq!(
                rgb.pixels()[row * width + column],
                blocks[row / 2][column / 2],
                "pixel ({}, {})",
                column,
                row
            );
        }
    }
}

#[test]
fn every_pixel_is_opaque_and_written() {
    let mut rng = StdRng::seed_from_u64(0x1234cccc);

    for (width, height) in [(2, 2), (8, 2), (2, 8), (16, 10), (64, 48)] {
        let buffer = random_frame(&mut rng, width, height);
        let frame = PlanarYUVFrame::new(&buffer, width as u32, height as u32).unwrap();

        let mut output = vec![0u32; width * height];
        convert_into(frame.luma(), frame.chroma(), width, height, &mut output);

        assert_eq!(output.len(), width * height);
        assert!(output.iter().all(|pixel| pixel >> 24 == 0xff));
    }
}

#[test]
fn output_beyond_frame_is_untouched() {
    let buffer = uniform_frame(4, 2, 235, 128);
    let frame = PlanarYUVFrame::new(&buffer, 4, 2).unwrap();

    let mut output = vec![0u32; 10];
    convert_into(frame.luma(), frame.chroma(), 4, 2, &mut output);

    assert!(output[..8].iter().all(|pixel| *pixel == 0xfffefefe));
    assert_eq!(&output[8..], &[0, 0]);
}

#[test]
fn channels_never_leak_into_each_other() {
    for y in 0..=255u8 {
        for u in (0..=255u8).step_by(3) {
            for v in (0..=255u8).step_by(3) {
                let pixel = yuv_to_argb(y, u, v);
                let expected =
                    |coefficients: i32| -> u32 { (coefficients.clamp(0, 262143) >> 10) as u32 };

                let luma = 1192 * (y as i32 - 16).max(0);
                let (u, v) = (u as i32 - 128, v as i32 - 128);

                let [a, r, g, b] = pixel.to_be_bytes();
                assert_eq!(a, 0xff);
                assert_eq!(r as u32, expected(luma + 1634 * v));
                assert_eq!(g as u32, expected(luma - 833 * v - 400 * u));
                assert_eq!(b as u32, expected(luma + 2066 * u));
            }
        }
    }
}

#[test]
fn parallel_conversion_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(42);
    let (width, height) = (320, 240);
    let buffer = random_frame(&mut rng, width, height);
    let frame = PlanarYUVFrame::new(&buffer, width as u32, height as u32).unwrap();

    let mut sequential = vec![0u32; width * height];
    let mut parallel = vec![0u32; width * height];
    convert_into(frame.luma(), frame.chroma(), width, height, &mut sequential);
    convert_parallel_into(frame.luma(), frame.chroma(), width, height, &mut parallel);

    assert_eq!(sequential, parallel);
}

#[test]
fn layouts_serialize_channels_in_order() {
    let buffer = [128, 128, 128, 128, 128, 128];
    let frame = PlanarYUVFrame::new(&buffer, 2, 2).unwrap();

    let rgba = convert(frame.luma(), frame.chroma(), 2, 2, PixelLayout::Rgba).to_bytes();
    assert_eq!(rgba, [0x82, 0x82, 0x82, 0xff].repeat(4));

    let rgb = convert(frame.luma(), frame.chroma(), 2, 2, PixelLayout::Rgb).to_bytes();
    assert_eq!(rgb, vec![0x82; 12]);

    let argb = convert(frame.luma(), frame.chroma(), 2, 2, PixelLayout::Argb32).to_bytes();
    assert_eq!(argb, 0xff828282u32.to_ne_bytes().repeat(4));
}

#[test]
fn planar_frame_rejects_inconsistent_buffers() {
    assert!(PlanarYUVFrame::new(&[0; 6], 2, 2).is_some());
    assert!(PlanarYUVFrame::new(&[0; 5], 2, 2).is_none());
    assert!(PlanarYUVFrame::new(&[0; 9], 3, 2).is_none());
    assert!(PlanarYUVFrame::new(&[], 0, 0).is_none());
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
enum BufferType {
    Yuv,
    Rgb,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
enum Stat {
    Width,
    Height,
}

#[derive(Default)]
struct TestFrameData {
    buffers: HashMap<BufferType, BytesMut>,
    stats: HashMap<Stat, u128>,
    error: Option<DropReason>,
}

impl PullableFrameProperties<BufferType, BytesMut> for TestFrameData {
    fn push(&mut self, key: BufferType, value: BytesMut) {
        self.buffers.insert(key, value);
    }

    fn pull(&mut self, key: &BufferType) -> Option<BytesMut> {
        self.buffers.remove(key)
    }
}

impl FrameProperties<Stat, u128> for TestFrameData {
    fn set(&mut self, key: Stat, value: u128) {
        self.stats.insert(key, value);
    }

    fn get(&self, key: &Stat) -> Option<u128> {
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

fn converter() -> NV12ToRGBConverter<BufferType, Stat> {
    NV12ToRGBConverter::new(
        BufferType::Yuv,
        BufferType::Rgb,
        Stat::Width,
        Stat::Height,
        PixelLayout::Rgba,
    )
}

fn frame_data(width: u32, height: u32, buffer: &[u8]) -> TestFrameData {
    let mut frame_data = TestFrameData::default();
    frame_data.set(Stat::Width, width as u128);
    frame_data.set(Stat::Height, height as u128);
    frame_data.push(BufferType::Yuv, BytesMut::from(buffer));
    frame_data
}

#[tokio::test]
async fn converter_fills_rgb_buffer() {
    let mut converter = converter();

    let mut frame_data = converter
        .process(frame_data(2, 2, &uniform_frame(2, 2, 16, 128)))
        .await
        .unwrap();

    assert!(frame_data.get_error().is_none());
    assert_eq!(frame_data.pull(&BufferType::Rgb).unwrap().to_vec(), [0, 0, 0, 0xff].repeat(4));
    assert!(frame_data.pull(&BufferType::Yuv).is_some());
}

#[tokio::test]
async fn converter_follows_geometry_changes() {
    let mut converter = converter().parallel();

    let mut small = converter
        .process(frame_data(2, 2, &uniform_frame(2, 2, 235, 128)))
        .await
        .unwrap();
    assert_eq!(small.pull(&BufferType::Rgb).unwrap().len(), 16);

    let mut large = converter
        .process(frame_data(4, 2, &uniform_frame(4, 2, 235, 128)))
        .await
        .unwrap();
    assert_eq!(large.pull(&BufferType::Rgb).unwrap().len(), 32);
}

#[tokio::test]
async fn converter_reports_inconsistent_frames() {
    let mut converter = converter();

    let missing_geometry = converter.process(TestFrameData::default()).await.unwrap();
    assert_eq!(missing_geometry.get_error(), Some(DropReason::MissingGeometry));

    let wrong_size = converter
        .process(frame_data(4, 4, &uniform_frame(2, 2, 16, 128)))
        .await
        .unwrap();
    assert_eq!(wrong_size.get_error(), Some(DropReason::InvalidFrameSize));
}
