//! Texture samplers referenced by material parameters.
//!
//! Loading and GPU residency of the texture itself belong to the renderer. Parameters only share
//! ownership of the sampler description.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Shared handle to a sampler. Parameters hold one strong reference each.
pub type SamplerRef = Rc<TextureSampler>;

/// Texture addressing outside of `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wrap {
    /// Repeat the texture.
    Repeat,
    /// Clamp to the edge texel.
    Clamp,
}

/// Texture filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// Nearest texel.
    Nearest,
    /// Linear interpolation between texels.
    Linear,
    /// Linear interpolation between texels and mip levels.
    LinearMipmapLinear,
}

/// How a texture is sampled by a shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSampler {
    /// Path of the texture asset.
    pub path: String,
    /// Whether mipmaps are generated for the texture.
    pub mipmaps: bool,
    /// Wrap mode along `(s, t)`.
    pub wrap: (Wrap, Wrap),
    /// Minification and magnification filters.
    pub filter: (Filter, Filter),
}

impl TextureSampler {
    /// Sampler for the texture at `path` with the default state for its mipmap setting.
    pub fn new<S: Into<String>>(path: S, mipmaps: bool) -> Self {
        let min = if mipmaps {
            Filter::LinearMipmapLinear
        } else {
            Filter::Linear
        };
        TextureSampler {
            path: path.into(),
            mipmaps,
            wrap: (Wrap::Repeat, Wrap::Repeat),
            filter: (min, Filter::Linear),
        }
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> SamplerRef {
        Rc::new(self)
    }
}
