//! Serializable material descriptions.
//!
//! ```ron
//! (
//!     parameters: [
//!         ("u_diffuseColor", Vector4((1.0, 0.5, 0.5, 1.0))),
//!         ("u_diffuseTexture", Texture(path: "res/brick.png", mipmaps: true)),
//!         ("u_lightPosition", Node("&Node::getTranslationWorld")),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

/// Initial value of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    /// Single float
    Float(f32),
    /// Single int
    Int(i32),
    /// 2 component vector
    Vector2([f32; 2]),
    /// 3 component vector
    Vector3([f32; 3]),
    /// 4 component vector
    Vector4([f32; 4]),
    /// Column major 4x4 matrix
    Matrix([f32; 16]),
    /// Sampler of a texture asset
    Texture {
        /// Path of the texture
        path: String,
        /// Whether to generate mipmaps
        #[serde(default)]
        mipmaps: bool,
    },
    /// Node accessor name
    Node(String),
}

/// Parameters of a material, applied in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    /// `(name, value)` pairs
    #[serde(default)]
    pub parameters: Vec<(String, ParameterValue)>,
}
