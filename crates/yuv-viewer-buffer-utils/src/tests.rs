use std::collections::HashMap;

use bytes::BytesMut;
use yuv_viewer_core::traits::{FrameProcessor, PullableFrameProperties};

use crate::pool::BuffersPool;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
enum BufferType {
    Test,
}

#[derive(Default)]
struct TestFrameData {
    buffers: HashMap<BufferType, BytesMut>,
}

impl PullableFrameProperties<BufferType, BytesMut> for TestFrameData {
    fn push(&mut self, key: BufferType, value: BytesMut) {
        self.buffers.insert(key, value);
    }

    fn pull(&mut self, key: &BufferType) -> Option<BytesMut> {
        self.buffers.remove(key)
    }
}

#[tokio::test]
async fn redeemed_buffers_are_reused() {
    let pool = BuffersPool::new(BufferType::Test, 1, 64);
    let mut borrower = pool.borrower();
    let mut redeemer = pool.redeemer();

    let dto = borrower.process(TestFrameData::default()).await.unwrap();
    let mut dto = redeemer.process(dto).await.unwrap();
    assert!(dto.pull(&BufferType::Test).is_none());

    let mut dto = borrower.process(TestFrameData::default()).await.unwrap();
    let buffer = dto.pull(&BufferType::Test).unwrap();
    assert!(buffer.is_empty());
    assert!(buffer.capacity() >= 64);
}

#[tokio::test]
async fn redeemer_drops_frames_without_buffer() {
    let pool = BuffersPool::new(BufferType::Test, 1, 64);

    let mut redeemer = pool.redeemer();
    assert!(redeemer.process(TestFrameData::default()).await.is_none());
}

#[tokio::test]
async fn borrowed_buffers_are_preallocated() {
    let pool = BuffersPool::new(BufferType::Test, 2, 128);
    let mut borrower = pool.borrower();

    for _ in 0..2 {
        let mut dto = borrower.process(TestFrameData::default()).await.unwrap();
        let buffer = dto.pull(&BufferType::Test).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 128);
    }
}
