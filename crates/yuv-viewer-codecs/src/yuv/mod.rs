pub mod nv12_to_rgb;
pub mod raster;

#[cfg(test)]
mod tests;

/// Upper bound of the fixed-point channel intermediates (18 bits, 10 of them fractional).
pub const CHANNEL_MAX: i32 = 262143;

/// BT.601 integer approximation of one YUV sample to a packed `0xAARRGGBB` pixel.
///
/// Coefficients are scaled by 1024; each channel is clamped to [`CHANNEL_MAX`] and
/// brought back to 8 bits by the shifts and masks of the final packing, alpha forced to 0xFF.
#[inline]
pub fn yuv_to_argb(y: u8, u: u8, v: u8) -> u32 {
    let y = (y as i32 - 16).max(0);
    let u = u as i32 - 128;
    let v = v as i32 - 128;

    let y1192 = 1192 * y;
    let r = (y1192 + 1634 * v).clamp(0, CHANNEL_MAX);
    let g = (y1192 - 833 * v - 400 * u).clamp(0, CHANNEL_MAX);
    let b = (y1192 + 2066 * u).clamp(0, CHANNEL_MAX);

    0xff00_0000
        | ((r << 6) as u32 & 0x00ff_0000)
        | ((g >> 2) as u32 & 0x0000_ff00)
        | ((b >> 10) as u32 & 0x0000_00ff)
}
