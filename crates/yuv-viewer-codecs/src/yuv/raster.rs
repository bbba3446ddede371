use rayon::prelude::*;

use crate::frame::{PixelLayout, RGBFrame};

use super::yuv_to_argb;

/// Converts one luma row. `chroma_row` holds the `width` bytes of V,U pairs shared by
/// this row and its neighbour in the same 2x2 block row.
#[inline]
fn convert_row(luma_row: &[u8], chroma_row: &[u8], output_row: &mut [u32]) {
    let blocks = luma_row
        .chunks_exact(2)
        .zip(chroma_row.chunks_exact(2))
        .zip(output_row.chunks_exact_mut(2));

    for ((luma, chroma), output) in blocks {
        let (v, u) = (chroma[0], chroma[1]);

        output[0] = yuv_to_argb(luma[0], u, v);
        output[1] = yuv_to_argb(luma[1], u, v);
    }
}

fn check_geometry(luma: &[u8], chroma: &[u8], width: usize, height: usize, output: &[u32]) {
    debug_assert!(width % 2 == 0 && height % 2 == 0, "odd geometry {}x{}", width, height);
    debug_assert!(luma.len() >= width * height);
    debug_assert!(chroma.len() >= width * height / 2);
    debug_assert!(output.len() >= width * height);
}

/// Converts a frame into the caller-supplied `output`, writing exactly `width * height` pixels.
///
/// Width and height must be even and the planes must hold at least `width * height` luma
/// and `width * height / 2` chroma bytes; nothing past those is ever read.
pub fn convert_into(luma: &[u8], chroma: &[u8], width: usize, height: usize, output: &mut [u32]) {
    check_geometry(luma, chroma, width, height, output);

    if width == 0 {
        return;
    }

    let rows = luma[..width * height]
        .chunks_exact(width)
        .zip(output[..width * height].chunks_exact_mut(width))
        .enumerate();

    for (row, (luma_row, output_row)) in rows {
        let chroma_offset = (row >> 1) * width;
        convert_row(luma_row, &chroma[chroma_offset..chroma_offset + width], output_row);
    }
}

/// Same output as [`convert_into`], rows spread over the rayon thread pool.
pub fn convert_parallel_into(
    luma: &[u8],
    chroma: &[u8],
    width: usize,
    height: usize,
    output: &mut [u32],
) {
    check_geometry(luma, chroma, width, height, output);

    if width == 0 {
        return;
    }

    output[..width * height]
        .par_chunks_exact_mut(width)
        .zip(luma[..width * height].par_chunks_exact(width))
        .enumerate()
        .for_each(|(row, (output_row, luma_row))| {
            let chroma_offset = (row >> 1) * width;
            convert_row(luma_row, &chroma[chroma_offset..chroma_offset + width], output_row);
        });
}

pub fn convert(
    luma: &[u8],
    chroma: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> RGBFrame {
    let mut frame = RGBFrame::new(width, height, layout);
    convert_into(
        luma,
        chroma,
        width as usize,
        height as usize,
        frame.pixels_mut(),
    );
    frame
}
