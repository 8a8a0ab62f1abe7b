use crate::error::BackendError;
use crate::render::{Framebuffer, PresentTarget};
use crate::window::Window;

use super::present::BlitPass;
use super::{Gpu, SurfaceErrorAction};

/// Presents software frames to the window through a wgpu surface.
pub struct WindowTarget {
    blit: BlitPass,
    gpu: Gpu,
    high_dpi: bool,
}

impl WindowTarget {
    /// Binds a surface to `window`.
    ///
    /// With `high_dpi` the drawable is the physical size; otherwise it is the
    /// logical size and the blit scales it up.
    pub fn new(window: &Window, high_dpi: bool) -> Result<Self, BackendError> {
        let gpu = pollster::block_on(Gpu::new(window.handle()))
            .map_err(|e| BackendError::Renderer(format!("{e:#}")))?;
        let blit = BlitPass::new(gpu.device(), gpu.surface_format());

        log::info!(
            "WindowTarget::new: surface {:?}, high_dpi={high_dpi}",
            gpu.surface_format()
        );

        Ok(Self { blit, gpu, high_dpi })
    }
}

impl PresentTarget for WindowTarget {
    fn size(&self) -> (u32, u32) {
        let window = self.gpu.window();
        let physical = window.inner_size();
        if self.high_dpi {
            (physical.width, physical.height)
        } else {
            let logical = physical.to_logical::<u32>(window.scale_factor());
            (logical.width, logical.height)
        }
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<(), BackendError> {
        if !self.gpu.sync_size() {
            return Ok(());
        }
        if !self.blit.upload(self.gpu.device(), self.gpu.queue(), frame) {
            return Ok(());
        }

        let blit = &self.blit;
        let Err(err) = self.gpu.present_with(|encoder, view| blit.draw(encoder, view)) else {
            return Ok(());
        };

        match self.gpu.recover(&err) {
            SurfaceErrorAction::Fatal => Err(BackendError::Renderer(format!("surface error: {err}"))),
            action => {
                log::debug!("WindowTarget: frame skipped ({action:?}): {err}");
                Ok(())
            }
        }
    }
}
