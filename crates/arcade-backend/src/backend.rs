//! Composition root.

use std::path::Path;

use crate::audio::Audio;
use crate::capture::{Capture, CaptureError, PixelBuffer};
use crate::config::BackendConfig;
use crate::coords::ColorRgba;
use crate::device::WindowTarget;
use crate::error::BackendError;
use crate::input::{Event, Input};
use crate::render::{self, PresentTarget, Renderer};
use crate::text::{FontId, FontTextRenderer, TextRenderer};
use crate::window::Window;

/// Owns every subsystem for one window.
///
/// Built in the order window, renderer, text, audio, capture; torn down in the
/// reverse order. Fields are declared in teardown order because Rust drops them
/// top to bottom.
pub struct Backend {
    capture: Capture,
    audio: Audio,
    text: Box<dyn TextRenderer>,
    renderer: Box<dyn Renderer>,
    input: Input,
    window: Window,
}

impl Backend {
    /// Brings up all subsystems described by `config`.
    ///
    /// The first failure aborts construction; it is logged once here and returned.
    /// Subsystems already built are released in reverse order.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::build(config).inspect_err(|e| log::error!("Backend::new failed: {e}"))
    }

    fn build(config: &BackendConfig) -> Result<Self, BackendError> {
        let window = Window::create(&config.window)?;

        let high_dpi = config.window.high_dpi;
        let mut renderer = render::create_renderer(config.render.api, || {
            let target = WindowTarget::new(&window, high_dpi)?;
            Ok(Box::new(target) as Box<dyn PresentTarget>)
        })?;
        renderer.set_clear_color(config.render.clear_color);

        let mut text: Box<dyn TextRenderer> = Box::new(FontTextRenderer::new());
        if let Some(path) = config.text.font_path() {
            text.load_font(path, config.text.default_font_size)?;
        }

        let mut audio = Audio::new();
        if config.audio.enabled {
            audio.init(&config.audio)?;
        }
        for (id, path) in &config.sounds {
            audio.load_sound(id, path)?;
        }

        let (w, h) = renderer.drawable_size();
        log::info!(
            "Backend ready: {} renderer, drawable {w}x{h}, {} font(s), {} sound(s)",
            config.render.api,
            text.font_count(),
            config.sounds.len(),
        );

        Ok(Self {
            capture: Capture::new(),
            audio,
            text,
            renderer,
            input: Input::new(),
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    pub fn text(&mut self) -> &mut dyn TextRenderer {
        self.text.as_mut()
    }

    pub fn audio(&mut self) -> &mut Audio {
        &mut self.audio
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    /// Drains pending window events, normalized to drawable coordinates.
    pub fn poll_events(&mut self) -> Vec<Event> {
        self.input.poll(&mut self.window, self.renderer.as_ref())
    }

    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: ColorRgba, font: Option<FontId>) {
        self.text
            .draw_utf8(self.renderer.as_mut(), text, x, y, color, font);
    }

    pub fn measure_text(&self, text: &str, font: Option<FontId>) -> (u32, u32) {
        self.text.measure_utf8(text, font)
    }

    pub fn capture_bmp(&mut self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        self.capture.save_bmp(self.renderer.as_mut(), path)
    }

    pub fn capture_argb8888(&mut self) -> Result<PixelBuffer, CaptureError> {
        self.capture.capture_argb8888(self.renderer.as_mut())
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.audio.shutdown();
        self.text.unload_all();
        log::debug!("Backend dropped");
    }
}
