//! A set of named parameters bound together.

use std::path::Path;

use log::debug;
use prism_config::Config;
use prism_core::{
    nalgebra::{Matrix4, Vector2, Vector3, Vector4},
    NodeRef,
};
use prism_error::{format_err, Error, ResultExt};

use crate::{
    description::{MaterialDescription, ParameterValue},
    effect::Effect,
    error::MaterialError,
    parameter::MaterialParameter,
};

/// Ordered collection of material parameters.
#[derive(Debug, Default)]
pub struct Material {
    parameters: Vec<MaterialParameter>,
}

impl Material {
    /// An empty material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a material from a description.
    ///
    /// `node` is the node `Node` entries bind to.
    pub fn from_description(
        description: &MaterialDescription,
        node: Option<&NodeRef>,
    ) -> Result<Self, Error> {
        let mut material = Material::new();
        for (name, value) in &description.parameters {
            let param = material.parameter_mut(name);
            match value {
                ParameterValue::Float(v) => param.set_float(*v),
                ParameterValue::Int(v) => param.set_int(*v),
                ParameterValue::Vector2(v) => param.set_vector2(&Vector2::from_column_slice(v)),
                ParameterValue::Vector3(v) => param.set_vector3(&Vector3::from_column_slice(v)),
                ParameterValue::Vector4(v) => param.set_vector4(&Vector4::from_column_slice(v)),
                ParameterValue::Matrix(m) => param.set_matrix(&Matrix4::from_column_slice(m)),
                ParameterValue::Texture { path, mipmaps } => {
                    param.set_texture(path.as_str(), *mipmaps);
                }
                ParameterValue::Node(accessor) => {
                    let node = node.ok_or_else(|| MaterialError::MissingNode {
                        parameter: name.clone(),
                    })?;
                    param.bind_value(node.clone(), accessor)?;
                }
            }
        }
        Ok(material)
    }

    /// Load a description from a RON file and build a material from it.
    pub fn load<P: AsRef<Path>>(path: P, node: Option<&NodeRef>) -> Result<Self, Error> {
        let path = path.as_ref();
        let description = MaterialDescription::load_no_fallback(path).with_context(|_| {
            format_err!("Failed to load material description '{}'", path.display())
        })?;
        Self::from_description(&description, node)
    }

    /// The parameter called `name`, created empty if missing.
    pub fn parameter_mut(&mut self, name: &str) -> &mut MaterialParameter {
        let index = match self.parameters.iter().position(|p| p.name() == name) {
            Some(index) => index,
            None => {
                debug!("Creating material parameter '{}'", name);
                self.parameters.push(MaterialParameter::new(name));
                self.parameters.len() - 1
            }
        };
        &mut self.parameters[index]
    }

    /// The parameter called `name`.
    pub fn parameter(&self, name: &str) -> Option<&MaterialParameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Remove and return the parameter called `name`.
    pub fn remove_parameter(&mut self, name: &str) -> Option<MaterialParameter> {
        let index = self.parameters.iter().position(|p| p.name() == name)?;
        Some(self.parameters.remove(index))
    }

    /// Parameters in insertion order.
    pub fn parameters(&self) -> impl Iterator<Item = &MaterialParameter> {
        self.parameters.iter()
    }

    /// Bind every parameter to `effect`, stopping at the first error.
    pub fn bind(&mut self, effect: &mut dyn Effect) -> Result<(), Error> {
        for param in &mut self.parameters {
            param.bind(effect)?;
        }
        Ok(())
    }

    /// Read node bound parameters again.
    pub fn update(&mut self) {
        for param in &mut self.parameters {
            param.refresh();
        }
    }

    /// Copy every parameter into a new material.
    pub fn clone_material(&self) -> Material {
        let parameters = self
            .parameters
            .iter()
            .map(|param| {
                let mut clone = MaterialParameter::new(param.name());
                param.clone_into(&mut clone);
                clone
            })
            .collect();
        Material { parameters }
    }
}
