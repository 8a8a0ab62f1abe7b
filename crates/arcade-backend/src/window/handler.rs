use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window as WinitWindow, WindowAttributes, WindowId};

use crate::input::RawEvent;
use crate::input::platform::WinitTranslator;

/// Receives winit callbacks while the loop is pumped and queues translated events.
pub(super) struct WindowHandler {
    /// Consumed by the first `resumed`.
    attributes: Option<WindowAttributes>,
    window: Option<Arc<WinitWindow>>,
    error: Option<String>,

    translator: WinitTranslator,
    pending: Vec<RawEvent>,
}

impl WindowHandler {
    pub(super) fn new(attributes: WindowAttributes) -> Self {
        Self {
            attributes: Some(attributes),
            window: None,
            error: None,
            translator: WinitTranslator::default(),
            pending: Vec::new(),
        }
    }

    pub(super) fn window(&self) -> Option<&Arc<WinitWindow>> {
        self.window.as_ref()
    }

    pub(super) fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    pub(super) fn push(&mut self, event: RawEvent) {
        self.pending.push(event);
    }

    pub(super) fn drain(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(attributes) = self.attributes.take() else {
            return;
        };

        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        let scale = window.scale_factor();
        self.translator.translate(scale, &event, &mut self.pending);
    }
}
