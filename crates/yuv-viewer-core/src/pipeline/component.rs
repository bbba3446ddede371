use log::{debug, info};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::traits::FrameProcessor;

macro_rules! tagged {
    ($self:ident, $msg:expr) => {{
        format!("[{}] {}", $self.tag.as_deref().unwrap_or(""), $msg)
    }};
}

type HaltCondition<F> = Box<dyn Fn(&F) -> bool + Send>;

pub struct Component<F> {
    processors: Vec<Box<dyn FrameProcessor<F> + Send>>,

    receiver: Option<UnboundedReceiver<F>>,
    sender: Option<UnboundedSender<F>>,

    halt_condition: Option<HaltCondition<F>>,

    tag: Option<String>,
}

impl<F: Default + Send + 'static> Component<F> {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            receiver: None,
            sender: None,
            halt_condition: None,
            tag: None,
        }
    }

    pub fn singleton<T: 'static + FrameProcessor<F> + Send>(processor: T) -> Self {
        Self::new().append(processor)
    }

    pub fn append<T: 'static + FrameProcessor<F> + Send>(mut self, processor: T) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Stops the component as soon as a processed frame satisfies `condition`.
    /// The output channel is closed, so every downstream component stops too.
    pub fn halt_when(mut self, condition: impl Fn(&F) -> bool + Send + 'static) -> Self {
        self.halt_condition = Some(Box::new(condition));
        self
    }

    //////////////////////
    // Internal methods //
    //////////////////////

    pub(crate) fn set_sender(&mut self, sender: UnboundedSender<F>) {
        self.sender = Some(sender);
    }

    pub(crate) fn set_receiver(&mut self, receiver: UnboundedReceiver<F>) {
        self.receiver = Some(receiver);
    }

    fn should_halt(&self, frame_data: &F) -> bool {
        self.halt_condition
            .as_ref()
            .map_or(false, |condition| condition(frame_data))
    }

    /// Runs the component until a channel closes or the halt condition is met; the
    /// task resolves to the halting frame in the latter case.
    pub(crate) fn launch(mut self) -> JoinHandle<Option<F>> {
        tokio::spawn(async move {
            loop {
                let mut frame_data = match self.receiver.as_mut() {
                    Some(receiver) => match receiver.recv().await {
                        Some(frame_data) => Some(frame_data),
                        None => {
                            info!("{}", tagged!(self, "Receive channel closed, stopping"));
                            return None;
                        }
                    },
                    None => {
                        debug!("No receiver registered, allocating an empty frame DTO");
                        Some(F::default())
                    }
                };

                for i in 0..self.processors.len() {
                    let current = match frame_data.take() {
                        Some(current) => current,
                        None => break,
                    };

                    frame_data = self.processors[i].process(current).await;

                    let halted = matches!(
                        frame_data.as_ref(),
                        Some(processed) if self.should_halt(processed)
                    );

                    if halted {
                        info!("{}", tagged!(self, "Halt condition met, stopping"));
                        return frame_data;
                    }
                }

                if let (Some(sender), Some(frame_data)) = (self.sender.as_ref(), frame_data) {
                    if sender.send(frame_data).is_err() {
                        info!("{}", tagged!(self, "Send channel closed, stopping"));
                        return None;
                    }
                }
            }
        })
    }
}

impl<F: Default + Send + 'static> Default for Component<F> {
    fn default() -> Self {
        Self::new()
    }
}
