use std::collections::HashMap;

use yuv_viewer::{
    buffers::BytesMut,
    error::DropReason,
    traits::{BorrowFrameProperties, FrameError, FrameProperties, PullableFrameProperties},
};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum BufferType {
    YuvFrame,
    RgbFrame,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Stat {
    Width,
    Height,
    CaptureTimestamp,
    PresentationDelay,
}

#[derive(Default, Debug)]
pub struct ViewerFrameData {
    buffers: HashMap<BufferType, BytesMut>,
    stats: HashMap<Stat, u128>,

    error: Option<DropReason>,
}

impl PullableFrameProperties<BufferType, BytesMut> for ViewerFrameData {
    fn push(&mut self, key: BufferType, value: BytesMut) {
        self.buffers.insert(key, value);
    }

    fn pull(&mut self, key: &BufferType) -> Option<BytesMut> {
        self.buffers.remove(key)
    }
}

impl BorrowFrameProperties<BufferType, BytesMut> for ViewerFrameData {
    fn get_ref(&self, key: &BufferType) -> Option<&BytesMut> {
        self.buffers.get(key)
    }
}

impl FrameProperties<Stat, u128> for ViewerFrameData {
    fn set(&mut self, key: Stat, value: u128) {
        self.stats.insert(key, value);
    }

    fn get(&self, key: &Stat) -> Option<u128> {
        self.stats.get(key).copied()
    }
}

impl FrameError<DropReason> for ViewerFrameData {
    fn report_error(&mut self, error: DropReason) {
        self.error = Some(error);
    }

    fn get_error(&self) -> Option<DropReason> {
        self.error
    }
}
