use std::{
    fs::{create_dir_all, File},
    io::Write,
    path::PathBuf,
};

use log::debug;
use yuv_viewer_codecs::PixelLayout;

use crate::{check_buffer, FrameSink, RenderError};

/// Writes every presented frame as a raw file named after its index and geometry.
pub struct RawFrameDumper {
    folder: PathBuf,
    layout: PixelLayout,

    dumped_frames: u64,
}

impl RawFrameDumper {
    pub fn new(folder: PathBuf, layout: PixelLayout) -> Result<Self, RenderError> {
        create_dir_all(&folder)?;

        Ok(Self {
            folder,
            layout,
            dumped_frames: 0,
        })
    }

    pub fn dumped_frames(&self) -> u64 {
        self.dumped_frames
    }
}

impl FrameSink for RawFrameDumper {
    fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn present(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<(), RenderError> {
        check_buffer(pixels, width, height, channels)?;

        let file_path = self.folder.join(format!(
            "{:06}_{}x{}.{}",
            self.dumped_frames,
            width,
            height,
            self.layout.extension()
        ));

        let mut output_file = File::create(&file_path)?;
        output_file.write_all(pixels)?;

        debug!("Dumped frame to {}", file_path.display());
        self.dumped_frames += 1;

        Ok(())
    }
}
