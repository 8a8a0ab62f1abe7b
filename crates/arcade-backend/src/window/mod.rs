//! The application window.
//!
//! Owns the winit event loop and the single window. The loop is pumped by the
//! caller's frame loop rather than run as a callback-driven main loop.

mod handler;

use std::sync::Arc;
use std::time::Duration;

use winit::dpi::LogicalSize;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window as WinitWindow;

use crate::config::WindowConfig;
use crate::error::BackendError;
use crate::input::{EventSource, RawEvent};

use handler::WindowHandler;

/// Upper bound on event-loop pumps while waiting for the window to appear.
const STARTUP_PUMPS: usize = 100;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

pub struct Window {
    // Dropped before the event loop.
    window: Arc<WinitWindow>,
    handler: WindowHandler,
    event_loop: EventLoop<()>,
}

impl Window {
    /// Creates the event loop and the window described by `config`.
    ///
    /// Only one window (and one event loop) may exist per process; a second call
    /// fails with [`BackendError::Platform`].
    pub fn create(config: &WindowConfig) -> Result<Self, BackendError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| BackendError::Platform(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let attributes = WinitWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(config.width.max(1)),
                f64::from(config.height.max(1)),
            ))
            .with_resizable(config.resizable);

        let mut handler = WindowHandler::new(attributes);

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler)
            {
                return Err(BackendError::Platform(format!(
                    "event loop exited during startup (code {code})"
                )));
            }
            if let Some(err) = handler.take_error() {
                return Err(BackendError::Window(err));
            }
            if handler.window().is_some() {
                break;
            }
        }

        let window = handler
            .window()
            .cloned()
            .ok_or_else(|| BackendError::Window("window was not created".into()))?;

        let physical = window.inner_size();
        log::info!(
            "Window::create: {:?} {}x{} logical, {}x{} physical",
            config.title,
            config.width,
            config.height,
            physical.width,
            physical.height,
        );

        Ok(Self {
            window,
            handler,
            event_loop,
        })
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Requests a new logical size. The platform may adjust or ignore it.
    pub fn resize(&self, width: u32, height: u32) {
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(f64::from(width), f64::from(height)));
    }

    /// Window size in logical units.
    pub fn size(&self) -> (u32, u32) {
        let logical = self
            .window
            .inner_size()
            .to_logical::<u32>(self.window.scale_factor());
        (logical.width, logical.height)
    }

    /// Window size in physical pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        let physical = self.window.inner_size();
        (physical.width, physical.height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    pub(crate) fn handle(&self) -> Arc<WinitWindow> {
        Arc::clone(&self.window)
    }
}

impl EventSource for Window {
    fn poll_raw_events(&mut self) -> Vec<RawEvent> {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            log::debug!("Window: event loop exited (code {code})");
            self.handler.push(RawEvent::Quit);
        }
        self.handler.drain()
    }

    fn logical_size(&self) -> (u32, u32) {
        self.size()
    }
}
