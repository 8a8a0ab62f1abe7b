use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use arcade_backend::logging::{LoggingConfig, init_logging};
use arcade_backend::{Backend, BackendConfig, ColorRgba, EventKind, Key, Rect};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

const FRAME: Duration = Duration::from_millis(16);
const BALL: i32 = 12;

struct Ball {
    x: i32,
    y: i32,
    vx: i32,
    vy: i32,
}

impl Ball {
    /// Advances one frame, bouncing off the drawable edges. Returns true on a bounce.
    fn step(&mut self, width: i32, height: i32) -> bool {
        let mut bounced = false;
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0 || self.x + BALL > width {
            self.vx = -self.vx;
            self.x = self.x.clamp(0, (width - BALL).max(0));
            bounced = true;
        }
        if self.y < 0 || self.y + BALL > height {
            self.vy = -self.vy;
            self.y = self.y.clamp(0, (height - BALL).max(0));
            bounced = true;
        }
        bounced
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = match std::env::args().nth(1) {
        Some(path) => BackendConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => BackendConfig {
            window: arcade_backend::WindowConfig {
                width: 800,
                height: 600,
                title: "arcade demo".into(),
                ..Default::default()
            },
            ..Default::default()
        },
    };

    let mut backend = Backend::new(&config).context("starting backend")?;

    if backend.text().default_font().is_none() {
        let loaded = FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find_map(|p| backend.text().load_font(p, 20).ok());
        if loaded.is_none() {
            log::warn!("no system font found; text is disabled");
        }
    }

    let mut ball = Ball { x: 40, y: 40, vx: 4, vy: 3 };
    let mut cursor = (0, 0);
    let mut bounces = 0u32;
    let mut shots = 0u32;

    'frames: loop {
        for event in backend.poll_events() {
            match event.kind {
                EventKind::Quit => break 'frames,
                EventKind::KeyDown => match event.key {
                    Some(Key::Escape) => break 'frames,
                    Some(Key::F12) => {
                        let path = format!("capture-{shots:03}.bmp");
                        match backend.capture_bmp(&path) {
                            Ok(()) => log::info!("saved {path}"),
                            Err(e) => log::warn!("capture failed: {e}"),
                        }
                        shots += 1;
                    }
                    _ => {}
                },
                EventKind::MouseMotion => cursor = (event.x, event.y),
                EventKind::WindowResized => {
                    log::debug!("drawable is now {}x{}", event.width, event.height);
                }
                _ => {}
            }
        }

        let (w, h) = backend.renderer().drawable_size();
        if ball.step(w as i32, h as i32) {
            bounces += 1;
            if let Err(e) = backend.audio().play_sound("bounce", 0) {
                log::debug!("bounce sound: {e}");
            }
        }

        let r = backend.renderer();
        r.begin_frame();
        r.draw_rect(Rect::new(0, 0, w as i32, 32), ColorRgba::rgb(30, 30, 48));
        r.draw_line(0, 32, w as i32 - 1, 32, ColorRgba::rgb(90, 90, 140));
        r.draw_rect(Rect::new(ball.x, ball.y, BALL, BALL), ColorRgba::rgb(240, 200, 60));
        r.draw_rect(
            Rect::new(cursor.0 - 4, cursor.1 - 4, 8, 8),
            ColorRgba::new(120, 200, 255, 160),
        );

        backend.draw_text(
            &format!("bounces {bounces}   F12 capture   Esc quit"),
            8,
            6,
            ColorRgba::white(),
            None,
        );

        backend.renderer().end_frame();
        std::thread::sleep(FRAME);
    }

    log::info!("bye after {bounces} bounces");
    Ok(())
}
