//! End-to-end frame flows on a headless renderer.

use arcade_backend::capture::{Capture, CaptureError};
use arcade_backend::input::{EventSource, Input, RawEvent};
use arcade_backend::render::{self, HeadlessTarget, PresentTarget};
use arcade_backend::{BackendError, ColorRgba, EventKind, FontTextRenderer, Rect, RenderApi, Renderer, TextRenderer, TextureHandle};

fn headless(w: u32, h: u32) -> (Box<dyn Renderer>, render::HeadlessHandle) {
    let target = HeadlessTarget::new(w, h);
    let handle = target.handle();
    let renderer = render::create_renderer(RenderApi::Software, move || {
        Ok(Box::new(target) as Box<dyn PresentTarget>)
    })
    .expect("software renderer");
    (renderer, handle)
}

struct Queue {
    logical: (u32, u32),
    events: Vec<RawEvent>,
}

impl EventSource for Queue {
    fn poll_raw_events(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut self.events)
    }

    fn logical_size(&self) -> (u32, u32) {
        self.logical
    }
}

#[test]
fn opaque_texture_survives_readback() {
    let (mut r, _) = headless(4, 4);
    r.begin_frame();

    let mut pixels = Vec::new();
    for i in 0..16u8 {
        pixels.extend_from_slice(&[i * 10, 255 - i * 10, i, 255]);
    }
    let tex = r.create_texture_rgba(4, 4, Some(&pixels), 16);
    assert!(tex.is_valid());
    r.draw_texture(tex, Rect::new(0, 0, 4, 4));

    let shot = Capture.capture_argb8888(r.as_mut()).unwrap();
    for i in 0..16u32 {
        let p = &pixels[i as usize * 4..i as usize * 4 + 4];
        let expected = ColorRgba::new(p[0], p[1], p[2], p[3]).to_argb();
        assert_eq!(shot.pixel(i % 4, i / 4), Some(expected), "pixel {i}");
    }
}

#[test]
fn handles_count_up_and_die_cleanly() {
    let (mut r, _) = headless(8, 8);
    let handles: Vec<TextureHandle> = (0..4)
        .map(|_| r.create_texture_rgba(1, 1, None, 4))
        .collect();
    let raw: Vec<u32> = handles.iter().map(|h| h.raw()).collect();
    assert_eq!(raw, vec![1, 2, 3, 4]);

    r.begin_frame();
    r.destroy_texture(handles[1]);
    r.destroy_texture(handles[1]);
    r.draw_texture(handles[1], Rect::new(0, 0, 8, 8));
    r.draw_texture(TextureHandle::INVALID, Rect::new(0, 0, 8, 8));

    let shot = Capture.capture_argb8888(r.as_mut()).unwrap();
    assert!((0..8).all(|y| (0..8).all(|x| shot.pixel(x, y) == Some(0xFF00_0000))));
}

#[test]
fn gpu_selection_is_refused() {
    let result = render::create_renderer(RenderApi::Gpu, || {
        Ok(Box::new(HeadlessTarget::new(1, 1)) as Box<dyn PresentTarget>)
    });
    assert!(matches!(result, Err(BackendError::UnsupportedRenderApi(RenderApi::Gpu))));
}

#[test]
fn resize_flows_from_target_to_events_and_capture() {
    let (mut r, handle) = headless(800, 600);
    handle.resize(1600, 1200);

    let mut source = Queue {
        logical: (800, 600),
        events: vec![
            RawEvent::WindowResized { width: 800, height: 600 },
            RawEvent::MouseMotion { x: 100.0, y: 50.0, dx: 5.0, dy: -5.0 },
        ],
    };
    let events = Input::new().poll(&mut source, r.as_ref());
    assert_eq!(events[0].kind, EventKind::WindowResized);
    assert_eq!((events[0].width, events[0].height), (1600, 1200));
    assert_eq!((events[1].x, events[1].y, events[1].dx, events[1].dy), (200, 100, 10, -10));

    r.begin_frame();
    r.end_frame();
    assert_eq!(handle.presented_frames(), 1);

    let shot = Capture.capture_argb8888(r.as_mut()).unwrap();
    assert_eq!((shot.width, shot.height), (1600, 1200));
}

#[test]
fn capture_right_after_a_resize_matches_the_drawable() {
    let (mut r, handle) = headless(8, 8);
    r.set_clear_color(ColorRgba::rgb(0x20, 0x40, 0x60));
    r.begin_frame();
    r.draw_rect(Rect::new(0, 0, 2, 2), ColorRgba::white());
    r.end_frame();

    handle.resize(16, 16);
    let shot = Capture.capture_argb8888(r.as_mut()).unwrap();
    assert_eq!((shot.width, shot.height), (16, 16));
    assert_eq!(shot.pixel(1, 1), Some(0xFFFF_FFFF));
    assert_eq!(shot.pixel(5, 5), Some(0xFF20_4060));
    assert_eq!(shot.pixel(15, 15), Some(0xFF20_4060));

    handle.resize(4, 4);
    let shot = Capture.capture_argb8888(r.as_mut()).unwrap();
    assert_eq!((shot.width, shot.height), (4, 4));
    assert_eq!(shot.pixel(0, 0), Some(0xFFFF_FFFF));
}

#[test]
fn zero_sized_drawable_cannot_be_captured() {
    let (mut r, handle) = headless(10, 10);
    handle.resize(0, 0);
    r.begin_frame();
    assert!(matches!(
        Capture.capture_argb8888(r.as_mut()),
        Err(CaptureError::EmptyDrawable(0, 0))
    ));
}

#[test]
fn text_without_font_leaves_frame_untouched() {
    let (mut r, _) = headless(16, 16);
    r.set_clear_color(ColorRgba::rgb(1, 2, 3));
    r.begin_frame();

    let mut text = FontTextRenderer::new();
    assert_eq!(text.measure_utf8("", None), (0, 0));
    text.draw_utf8(r.as_mut(), "nothing", 0, 0, ColorRgba::white(), None);

    let shot = Capture.capture_argb8888(r.as_mut()).unwrap();
    assert_eq!(shot.pixel(0, 0), Some(0xFF01_0203));
}
