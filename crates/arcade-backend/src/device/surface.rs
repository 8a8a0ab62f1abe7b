//! Surface configuration choices.

/// Picks the swapchain format: an 8-bit sRGB format if asked for and offered,
/// otherwise whatever the surface lists first.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat::{Bgra8UnormSrgb, Rgba8UnormSrgb};

    let srgb = prefer_srgb
        .then(|| formats.iter().copied().find(|f| matches!(f, Bgra8UnormSrgb | Rgba8UnormSrgb)))
        .flatten();
    srgb.or_else(|| formats.first().copied())
}

/// Vsync-paced presentation. With relaxed FIFO a late frame is shown at once
/// instead of waiting for the next refresh.
pub(crate) fn choose_present_mode(supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if supported.contains(&wgpu::PresentMode::FifoRelaxed) {
        wgpu::PresentMode::FifoRelaxed
    } else {
        wgpu::PresentMode::Fifo
    }
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Texture format the CPU frame is uploaded as.
///
/// Framebuffer bytes are already display-encoded. Matching the surface's sRGB-ness
/// makes the decode on sampling and the encode on write cancel out.
pub(crate) fn frame_texture_format(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface_format.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}
