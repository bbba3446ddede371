use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::BytesMut;
use yuv_viewer_core::traits::{FrameProcessor, PullableFrameProperties};
use tokio::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex,
};

// Milliseconds a borrower waits before logging that the pool is exhausted.
const BORROW_TIMEOUT: u64 = 1000;

/// Fixed set of buffers circulating between a borrower at the head of the pump and a
/// redeemer at its tail, so that steady-state frames never allocate.
pub struct BuffersPool<K: Copy> {
    slot_id: K,
    buffers_sender: Sender<BytesMut>,
    buffers_receiver: Arc<Mutex<Receiver<BytesMut>>>,
}

impl<K: Copy> BuffersPool<K> {
    pub fn new(slot_id: K, pool_size: usize, buffer_size: usize) -> Self {
        let (sender, receiver) = mpsc::channel(pool_size);

        for _ in 0..pool_size {
            let buf = BytesMut::with_capacity(buffer_size);
            if sender.try_send(buf).is_err() {
                log::warn!("Pool channel is full, not all buffers have been allocated");
                break;
            }
        }

        Self {
            slot_id,
            buffers_sender: sender,
            buffers_receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    pub fn borrower(&self) -> BufferBorrower<K> {
        BufferBorrower {
            slot_id: self.slot_id,
            receiver: self.buffers_receiver.clone(),
        }
    }

    pub fn redeemer(&self) -> BufferRedeemer<K> {
        BufferRedeemer {
            slot_id: self.slot_id,
            sender: self.buffers_sender.clone(),
        }
    }
}

pub struct BufferBorrower<K> {
    slot_id: K,
    receiver: Arc<Mutex<Receiver<BytesMut>>>,
}

#[async_trait]
impl<F, K> FrameProcessor<F> for BufferBorrower<K>
where
    K: Copy + Debug + Send,
    F: PullableFrameProperties<K, BytesMut> + Send + 'static,
{
    async fn process(&mut self, mut frame_data: F) -> Option<F> {
        log::debug!("Borrowing '{:?}' buffer...", self.slot_id);

        let mut receiver = self.receiver.lock().await;

        loop {
            let borrowed =
                tokio::time::timeout(Duration::from_millis(BORROW_TIMEOUT), receiver.recv()).await;

            match borrowed {
                Ok(Some(buffer)) => {
                    frame_data.push(self.slot_id, buffer);
                    break;
                }
                Ok(None) => {
                    log::warn!("'{:?}' pool has been closed", self.slot_id);
                    return None;
                }
                Err(err) => {
                    log::warn!("Unable to borrow '{:?}' buffer: {:?}", self.slot_id, err);
                }
            }
        }

        Some(frame_data)
    }
}

pub struct BufferRedeemer<K> {
    slot_id: K,
    sender: Sender<BytesMut>,
}

#[async_trait]
impl<F, K> FrameProcessor<F> for BufferRedeemer<K>
where
    K: Copy + Debug + Send,
    F: PullableFrameProperties<K, BytesMut> + Send + 'static,
{
    async fn process(&mut self, mut frame_data: F) -> Option<F> {
        log::debug!("Redeeming '{:?}' buffer...", self.slot_id);

        match frame_data.pull(&self.slot_id) {
            Some(mut buffer) => {
                buffer.clear();

                if self.sender.send(buffer).await.is_err() {
                    log::warn!(
                        "Unable to redeem '{:?}' buffer, the pool has been closed",
                        self.slot_id
                    );
                }
            }
            None => {
                log::error!("Missing '{:?}' buffer", self.slot_id);
                return None;
            }
        }

        Some(frame_data)
    }
}
