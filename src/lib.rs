//! Prism binds material parameters to shader uniforms and animates them.
//!
//! The crate re-exports the Prism sub crates and carries the default logger.
//!
//! # Example
//!
//! ```
//! use prism::{
//!     material::{AnimationTarget, AnimationValue, MaterialParameter, ParameterProperty},
//!     core::nalgebra::Vector3,
//! };
//!
//! let mut color = MaterialParameter::new("u_diffuseColor");
//! color.set_vector3(&Vector3::new(1.0, 2.0, 3.0));
//!
//! let sample = AnimationValue::from(vec![4.0, 5.0, 6.0]);
//! color.apply_value(ParameterProperty::Uniform, &sample, 0.5);
//!
//! let mut current = AnimationValue::new(3);
//! color.current_value(ParameterProperty::Uniform, &mut current);
//! assert_eq!(&[2.5, 3.5, 4.5], current.as_slice());
//! ```
#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2018_compatibility
)]
#![warn(clippy::all)]

pub use prism_config as config;
pub use prism_core as core;
pub use prism_error as error;
pub use prism_material as material;

pub use self::{
    error::{Error, Result},
    logger::{start_logger, LevelFilter, LoggerConfig},
};

pub mod prelude;

mod logger;
