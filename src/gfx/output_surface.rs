//! The automaton's output image
//!
//! A single RGBA texture the size of the grid, write-only from the compute
//! stage during a step, read-only from the presentation pass during a draw.
//! Allocated once at startup and never resized.

/// RGBA image the kernel writes and the display quad samples.
pub struct OutputSurface {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl OutputSurface {
    /// Allocates the `width * height` output image.
    ///
    /// `STORAGE_BINDING` for the kernel's image writes, `TEXTURE_BINDING` for
    /// presentation sampling. Allocation refusal is fatal to startup.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("automaton output surface"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// View bound by both the compute stage (write) and the display pass
    /// (sample).
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// The underlying texture.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Image width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }
}
