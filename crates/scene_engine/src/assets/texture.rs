//! Texture upload policy
//!
//! Textures start as a 1x1 placeholder so draws never wait for a decode.
//! Once the image arrives its size decides the sampler: power-of-two images
//! get a mip chain, anything else is clamped to the edge and filtered linearly
//! with no mips.

use crate::assets::{AssetError, ImageData};
use crate::render::backend::{FilterMode, RenderBackend, TextureHandle, TextureSampling, WrapMode};

/// How a decoded image is prepared after upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePlan {
    /// Build a mip chain
    pub generate_mipmaps: bool,
    /// Sampler state to apply
    pub sampling: TextureSampling,
}

impl TexturePlan {
    /// Plan for an image of the given size
    pub fn for_size(width: u32, height: u32) -> Self {
        if width.is_power_of_two() && height.is_power_of_two() {
            Self {
                generate_mipmaps: true,
                sampling: TextureSampling {
                    wrap: WrapMode::Repeat,
                    min_filter: FilterMode::LinearMipmapLinear,
                },
            }
        } else {
            Self {
                generate_mipmaps: false,
                sampling: TextureSampling {
                    wrap: WrapMode::ClampToEdge,
                    min_filter: FilterMode::Linear,
                },
            }
        }
    }
}

/// Create a texture holding a single `color` pixel
pub fn create_placeholder(backend: &mut dyn RenderBackend, color: [u8; 4]) -> Result<TextureHandle, AssetError> {
    let texture = backend.create_texture()?;
    backend.upload_texture(texture, 1, 1, &color)?;
    Ok(texture)
}

/// Replace a texture's contents with a decoded image and apply its plan
pub fn upload_image(
    backend: &mut dyn RenderBackend,
    texture: TextureHandle,
    image: &ImageData,
) -> Result<TexturePlan, AssetError> {
    backend.upload_texture(texture, image.width, image.height, &image.rgba)?;

    let plan = TexturePlan::for_size(image.width, image.height);
    if plan.generate_mipmaps {
        backend.generate_mipmaps(texture)?;
    }
    backend.set_sampling(texture, plan.sampling)?;
    Ok(plan)
}
