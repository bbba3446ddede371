use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use bytes::BytesMut;
use log::{debug, info, warn};
use yuv_viewer_codecs::PlanarYUVFrame;

use super::{error::FrameSourceError, header::StreamFrameHeader};

/// Reader of a self-framing stream: every record is a [`StreamFrameHeader`] followed by
/// `size` bytes of YUV420 payload.
///
/// The payload buffer is owned by the source and reused across records; it is only
/// reallocated when a header declares a different size than the recorded one.
pub struct StreamFrameSource<R> {
    reader: R,

    buffer: Option<BytesMut>,
    recorded_size: usize,

    width: u32,
    height: u32,

    allocations: usize,
    frames_read: u64,
}

impl StreamFrameSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameSourceError> {
        let file = File::open(path.as_ref())?;
        info!("Opened frame stream {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> StreamFrameSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: None,
            recorded_size: 0,
            width: 0,
            height: 0,
            allocations: 0,
            frames_read: 0,
        }
    }

    /// Reads the next record. The returned frame borrows the internal buffer and is
    /// valid until the next call.
    ///
    /// The buffer is sized from the header before the payload is read, so a valid header
    /// declaring a large frame (up to about 4 GiB) is allocated in full even when the
    /// record later turns out to be truncated.
    pub fn next_frame(&mut self) -> Result<PlanarYUVFrame<'_>, FrameSourceError> {
        let header = self.read_header()?;

        if !header.is_valid() {
            warn!("Header info error: {:?}", header);
            return Err(FrameSourceError::InvalidHeader(header));
        }

        let size = header.payload_size();
        self.width = header.width;
        self.height = header.height;

        self.ensure_buffer(size);

        let Self { reader, buffer, .. } = &mut *self;
        let buffer = buffer.get_or_insert_with(BytesMut::new);
        let read = read_full(reader, buffer).map_err(FrameSourceError::Stream)?;
        if read != size {
            return Err(FrameSourceError::TruncatedPayload {
                expected: size,
                read,
            });
        }

        self.frames_read += 1;

        let buffer = self.buffer.as_deref().unwrap_or_default();
        PlanarYUVFrame::new(buffer, header.width, header.height)
            .ok_or(FrameSourceError::InvalidHeader(header))
    }

    /// Size of the payload buffer currently allocated, zero before the first record.
    pub fn recorded_size(&self) -> usize {
        self.recorded_size
    }

    /// Number of payload buffer allocations, the first one included.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_header(&mut self) -> Result<StreamFrameHeader, FrameSourceError> {
        let mut raw = [0u8; StreamFrameHeader::LEN];

        let read = read_full(&mut self.reader, &mut raw).map_err(FrameSourceError::Stream)?;
        if read != raw.len() {
            if read == 0 {
                info!("End of stream after {} frames", self.frames_read);
            } else {
                warn!("Stream ended inside a header ({} of {} bytes)", read, raw.len());
            }
            return Err(FrameSourceError::EndOfStream);
        }

        StreamFrameHeader::parse(&raw).ok_or(FrameSourceError::EndOfStream)
    }

    /// Size update and allocation happen together, so the recorded size always
    /// describes the buffer actually held.
    fn ensure_buffer(&mut self, size: usize) {
        let reusable = self.buffer.is_some() && self.recorded_size == size;

        if !reusable {
            if self.buffer.is_some() {
                debug!("Reallocating frame buffer {} -> {} bytes", self.recorded_size, size);
            } else {
                debug!("Buffer create {}x{} ({} bytes)", self.width, self.height, size);
            }

            let mut buffer = BytesMut::with_capacity(size);
            buffer.resize(size, 0);

            self.buffer = Some(buffer);
            self.recorded_size = size;
            self.allocations += 1;
        }
    }
}

fn read_full<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut read = 0;

    while read < buffer.len() {
        match reader.read(&mut buffer[read..]) {
            Ok(0) => break,
            Ok(count) => read += count,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    Ok(read)
}
