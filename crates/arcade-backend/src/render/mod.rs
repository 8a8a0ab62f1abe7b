//! Renderer abstraction and the software backend.
//!
//! Callers draw through `dyn Renderer`; concrete backends own their textures
//! behind opaque [`TextureHandle`]s and present into a [`PresentTarget`].
//!
//! Convention:
//! - coordinates are drawable (backing-buffer) pixels, top-left origin
//! - colors use straight alpha

mod renderer;
pub mod soft;
pub mod target;
pub mod textures;

pub use renderer::{Renderer, TextureHandle};
pub use soft::SoftRenderer;
pub use target::{Framebuffer, HeadlessHandle, HeadlessTarget, PresentTarget};
pub use textures::TextureTable;

use crate::config::RenderApi;
use crate::error::BackendError;

/// Largest texture edge accepted by [`Renderer::create_texture_rgba`].
pub const MAX_TEXTURE_DIMENSION: u32 = 16_384;

/// Builds the renderer selected by `api`.
///
/// `make_target` runs only once the selection is known to be implemented, so an
/// unsupported API fails before any window surface or GPU context is created.
pub fn create_renderer<F>(api: RenderApi, make_target: F) -> Result<Box<dyn Renderer>, BackendError>
where
    F: FnOnce() -> Result<Box<dyn PresentTarget>, BackendError>,
{
    match api {
        RenderApi::Software => {
            let target = make_target()?;
            Ok(Box::new(SoftRenderer::new(target)))
        }
        RenderApi::Gpu => Err(BackendError::UnsupportedRenderApi(api)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn software_api_builds_renderer() {
        let renderer = create_renderer(RenderApi::Software, || {
            Ok(Box::new(HeadlessTarget::new(64, 32)))
        })
        .unwrap();
        assert_eq!(renderer.drawable_size(), (64, 32));
    }

    #[test]
    fn gpu_api_fails_without_building_target() {
        let mut target_built = false;
        let result = create_renderer(RenderApi::Gpu, || {
            target_built = true;
            Ok(Box::new(HeadlessTarget::new(1, 1)))
        });

        assert!(matches!(
            result,
            Err(BackendError::UnsupportedRenderApi(RenderApi::Gpu))
        ));
        assert!(!target_built);
    }

    #[test]
    fn target_failure_is_propagated() {
        let result = create_renderer(RenderApi::Software, || {
            Err(BackendError::Renderer("no adapter".into()))
        });
        assert!(matches!(result, Err(BackendError::Renderer(msg)) if msg == "no adapter"));
    }
}
