//! Contains common types that can be glob-imported (`*`) for convenience.

pub use crate::config::Config;
pub use crate::core::{Node, NodeRef, Transform};
pub use crate::material::{
    AnimationTarget, AnimationValue, Effect, Material, MaterialParameter, ParameterProperty,
    Uniform, UniformValue, ValueKind,
};
