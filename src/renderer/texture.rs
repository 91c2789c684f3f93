//! GPU texture abstraction
//!
//! Owns the texture, view, and sampler for one renderable's color texture.
//! Textures start as a 1x1 white placeholder so a member is always bindable,
//! and are replaced wholesale on retexture.

use std::path::Path;

use crate::errors::Result;
use crate::host::GpuContext;
use crate::renderer::mipmap::MipmapGenerator;

/// Color texture format for member textures.
pub(crate) const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,

    pub width: u32,
    pub height: u32,
    pub mip_level_count: u32,
}

impl GpuTexture {
    /// 1x1 opaque white placeholder; bound until the owner is retextured.
    pub(crate) fn blank(gpu: &GpuContext) -> Self {
        Self::create(gpu, 1, 1, &[255, 255, 255, 255])
    }

    /// Uploads a decoded RGBA image and regenerates its mip chain.
    pub(crate) fn from_image(
        gpu: &GpuContext,
        mipmaps: &MipmapGenerator,
        image: &image::RgbaImage,
    ) -> Self {
        let texture = Self::create(gpu, image.width(), image.height(), image.as_raw());
        mipmaps.generate(gpu, &texture.texture, texture.mip_level_count);
        texture
    }

    fn create(gpu: &GpuContext, width: u32, height: u32, pixels: &[u8]) -> Self {
        let mip_level_count = mip_level_count(width, height);
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Member Color Texture"),
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Bilinear magnification, bilinear + mipmap minification.
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Member Color Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
            mip_level_count,
        }
    }
}

/// Full mip chain length down to 1x1.
#[must_use]
pub(crate) fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Decodes an image from `path`, vertically mirrored to match the
/// geometry's texture-coordinate convention.
pub fn load_rgba_image(path: &Path) -> Result<image::RgbaImage> {
    let image = image::open(path)?;
    Ok(image.flipv().into_rgba8())
}
