/// Byte length of a YUV420 frame, `None` when the geometry cannot describe one
/// (zero or odd dimensions, or a size that does not fit in memory).
pub fn yuv420_frame_size(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return None;
    }

    let pixels = (width as usize).checked_mul(height as usize)?;
    pixels.checked_mul(3).map(|size| size / 2)
}

/// Borrowed view over a contiguous YUV420 buffer, split into its two planes.
#[derive(Debug, Clone, Copy)]
pub struct PlanarYUVFrame<'a> {
    width: u32,
    height: u32,
    luma: &'a [u8],
    chroma: &'a [u8],
}

impl<'a> PlanarYUVFrame<'a> {
    pub fn new(buffer: &'a [u8], width: u32, height: u32) -> Option<Self> {
        let size = yuv420_frame_size(width, height)?;
        if buffer.len() != size {
            return None;
        }

        let (luma, chroma) = buffer.split_at(width as usize * height as usize);

        Some(Self {
            width,
            height,
            luma,
            chroma,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn luma(&self) -> &'a [u8] {
        self.luma
    }

    /// Interleaved V,U pairs.
    pub fn chroma(&self) -> &'a [u8] {
        self.chroma
    }
}

/// Byte layout a presentation surface expects for each converted pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// The packed `0xAARRGGBB` value in host byte order, as a plain copy of the pixel array.
    Argb32,
    Rgba,
    Rgb,
}

impl PixelLayout {
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Argb32 | PixelLayout::Rgba => 4,
            PixelLayout::Rgb => 3,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            PixelLayout::Argb32 => "argb32",
            PixelLayout::Rgba => "rgba",
            PixelLayout::Rgb => "rgb",
        }
    }
}

/// Converted frame: one `0xAARRGGBB` value per luma sample, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RGBFrame {
    width: u32,
    height: u32,
    layout: PixelLayout,
    pixels: Vec<u32>,
}

impl RGBFrame {
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            width,
            height,
            layout,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len() * self.channels()
    }

    /// Serializes the pixels into `output`, which must be exactly `byte_len()` bytes long.
    pub fn write_to(&self, output: &mut [u8]) {
        assert_eq!(output.len(), self.byte_len(), "output buffer size mismatch");

        let channels = self.channels();
        for (pixel, target) in self.pixels.iter().zip(output.chunks_exact_mut(channels)) {
            let [a, r, g, b] = pixel.to_be_bytes();

            match self.layout {
                PixelLayout::Argb32 => target.copy_from_slice(&pixel.to_ne_bytes()),
                PixelLayout::Rgba => target.copy_from_slice(&[r, g, b, a]),
                PixelLayout::Rgb => target.copy_from_slice(&[r, g, b]),
            }
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.byte_len()];
        self.write_to(&mut bytes);
        bytes
    }
}
