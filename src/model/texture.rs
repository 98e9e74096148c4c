use std::path::Path;

use image::RgbaImage;

use crate::error::{DemoError, ResourceKind, Result};

/// Decodes an image file into tightly packed RGBA8.
pub fn decode_rgba(path: &Path, kind: ResourceKind) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| DemoError::resource(kind, path, e))?;
    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DemoError::resource(kind, path, "image has no pixels"));
    }
    Ok(rgba)
}

/// Normal maps hold vectors, not colors, so they skip the sRGB decode.
pub fn format_for(kind: ResourceKind) -> wgpu::TextureFormat {
    match kind {
        ResourceKind::NormalMap => wgpu::TextureFormat::Rgba8Unorm,
        _ => wgpu::TextureFormat::Rgba8UnormSrgb,
    }
}

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        kind: ResourceKind,
    ) -> Result<Self> {
        let rgba = decode_rgba(path, kind)?;
        log::info!(
            "Loaded {} {} ({}x{})",
            kind,
            path.display(),
            rgba.width(),
            rgba.height()
        );
        let label = format!("{} {}", kind, path.display());
        Ok(Self::from_rgba(device, queue, &rgba, kind, Some(&label)))
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &RgbaImage,
        kind: ResourceKind,
        label: Option<&str>,
    ) -> Self {
        let (width, height) = rgba.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: format_for(kind),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // The quad's UVs run past 1.0 to tile the texture.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    pub fn destroy(&self) {
        self.texture.destroy();
    }
}
