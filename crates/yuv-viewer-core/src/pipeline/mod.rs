use log::info;
use tokio::{sync::mpsc, task::JoinHandle};

use self::component::Component;

pub mod component;


pub struct Pipeline<F> {
    components: Vec<Component<F>>,

    tag: String,

    bound: bool,
}

impl<F: Default + Send + 'static> Pipeline<F> {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),

            tag: "".to_string(),

            bound: false,
        }
    }

    pub fn singleton(component: Component<F>) -> Self {
        Self::new().link(component)
    }

    pub fn link(mut self, component: Component<F>) -> Self {
        self.components.push(component);
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Launches every component. Each handle resolves to the frame that met the
    /// component's halt condition, or `None` when the component stopped on a closed channel.
    pub fn run(mut self) -> Vec<JoinHandle<Option<F>>> {
        if !self.bound {
            self.bind();
        }

        info!("[{}] Launching {} components...", self.tag, self.components.len());

        self.components
            .into_iter()
            .map(|component| component.launch())
            .collect()
    }

    fn bind(&mut self) {
        info!("[{}] Binding channels...", self.tag);

        for i in 1..self.components.len() {
            let (sender, receiver) = mpsc::unbounded_channel::<F>();

            self.components[i - 1].set_sender(sender);
            self.components[i].set_receiver(receiver);
        }

        self.bound = true;
    }
}

impl<F: Default + Send + 'static> Default for Pipeline<F> {
    fn default() -> Self {
        Self::new()
    }
}
