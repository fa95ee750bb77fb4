//! Material parameters for Prism.
//!
//! A [`MaterialParameter`] stores one typed value and uploads it to the shader uniform of the
//! same name. Values can be plain data, shared arrays, texture samplers, values computed at bind
//! time, or properties read from a scene node. Float based values expose their components as flat
//! channels to the keyframe animation system.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2018_compatibility
)]
#![warn(clippy::all)]

pub use self::{
    animation::{lerp, AnimationTarget, AnimationValue, ParameterProperty},
    binding::upload,
    description::{MaterialDescription, ParameterValue},
    effect::{Effect, EffectId, ElementView, Uniform, UniformValue},
    error::MaterialError,
    material::Material,
    method::{method, MaterialMethod, MethodRef, ValueMethod},
    node_binding::{NodeAccessor, NodeBinding},
    parameter::MaterialParameter,
    sampler::{Filter, SamplerRef, TextureSampler, Wrap},
    sampling::{ChannelPrimitive, ChannelSampler},
    value::{array, ArrayRef, FloatStorage, Value, ValueCell, ValueKind},
};

pub use minterpolate::{InterpolationFunction, InterpolationPrimitive};

pub mod animation;
pub mod binding;
pub mod description;
pub mod effect;
pub mod material;
pub mod method;
pub mod node_binding;
pub mod parameter;
pub mod sampler;
pub mod sampling;
pub mod value;

mod error;
