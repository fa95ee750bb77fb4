use std::{error::Error, fmt};

use crate::value::ValueKind;

/// Configuration errors raised by material parameters.
///
/// None of these are recoverable at runtime: they point at a misconfigured material or a caller
/// bug, so they are reported once and never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// A value of this kind cannot be uploaded to a uniform.
    UnsupportedKind {
        /// Uniform the upload was attempted for
        uniform: String,
        /// Kind held by the parameter
        kind: ValueKind,
    },
    /// The name is not part of the node accessor table.
    UnknownNodeAccessor(String),
    /// A node binding was requested without a node to bind to.
    MissingNode {
        /// Parameter requesting the binding
        parameter: String,
    },
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::UnsupportedKind { uniform, kind } => write!(
                f,
                "Unsupported material parameter type {:?} for uniform '{}'",
                kind, uniform
            ),
            MaterialError::UnknownNodeAccessor(name) => {
                write!(f, "Unsupported material parameter binding '{}'", name)
            }
            MaterialError::MissingNode { parameter } => write!(
                f,
                "Material parameter '{}' is bound to a node property but no node was given",
                parameter
            ),
        }
    }
}

impl Error for MaterialError {}
