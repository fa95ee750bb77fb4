//! Transforms and the scene node hierarchy consumed by material bindings.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2018_compatibility
)]
#![warn(clippy::all)]

pub use nalgebra;

pub use self::{
    node::{Node, NodeRef},
    transform::Transform,
};

pub mod node;
pub mod transform;
