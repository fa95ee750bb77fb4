//! Named material parameters and their uniform binding.

use log::{debug, warn};
use prism_core::{
    nalgebra::{Matrix4, Vector2, Vector3, Vector4},
    NodeRef,
};
use prism_error::Error;

use crate::{
    binding::upload,
    effect::{Effect, Uniform},
    error::MaterialError,
    method::MethodRef,
    node_binding::NodeBinding,
    sampler::{SamplerRef, TextureSampler},
    value::{ArrayRef, FloatStorage, Value, ValueCell, ValueKind},
};

/// A named value bound to the shader uniform of the same name.
///
/// The uniform handle is cached after the first successful lookup and looked up again whenever
/// the parameter is bound to a different effect.
#[derive(Debug)]
pub struct MaterialParameter {
    name: String,
    cell: ValueCell,
    uniform: Option<Uniform>,
}

impl MaterialParameter {
    /// Create an empty parameter.
    pub fn new<S: Into<String>>(name: S) -> Self {
        MaterialParameter {
            name: name.into(),
            cell: ValueCell::new(),
            uniform: None,
        }
    }

    /// Name of the parameter, and of the uniform it binds to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value.
    pub fn cell(&self) -> &ValueCell {
        &self.cell
    }

    pub(crate) fn cell_mut(&mut self) -> &mut ValueCell {
        &mut self.cell
    }

    /// Kind of the stored value.
    pub fn kind(&self) -> ValueKind {
        self.cell.kind()
    }

    /// Number of stored elements.
    pub fn count(&self) -> usize {
        self.cell.count()
    }

    /// The cached uniform handle, if any.
    pub fn uniform(&self) -> Option<&Uniform> {
        self.uniform.as_ref()
    }

    /// Reset the value to [`ValueKind::None`], releasing whatever it held.
    pub fn clear_value(&mut self) {
        self.cell.clear();
    }

    /// Store a single float.
    pub fn set_float(&mut self, value: f32) {
        self.cell.set_float(value);
    }

    /// Store a single int.
    pub fn set_int(&mut self, value: i32) {
        self.cell.set_int(value);
    }

    /// Reference `count` floats of a caller owned array.
    pub fn set_float_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.cell.set_float_array(data, count);
    }

    /// Reference `count` ints of a caller owned array.
    pub fn set_int_array(&mut self, data: ArrayRef<i32>, count: usize) {
        self.cell.set_int_array(data, count);
    }

    /// Store a copy of `value`.
    pub fn set_vector2(&mut self, value: &Vector2<f32>) {
        self.cell.set_vector2(value);
    }

    /// Store a copy of `value`.
    pub fn set_vector3(&mut self, value: &Vector3<f32>) {
        self.cell.set_vector3(value);
    }

    /// Store a copy of `value`.
    pub fn set_vector4(&mut self, value: &Vector4<f32>) {
        self.cell.set_vector4(value);
    }

    /// Reference `count` packed vectors of a caller owned array.
    pub fn set_vector2_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.cell.set_vector2_array(data, count);
    }

    /// Reference `count` packed vectors of a caller owned array.
    pub fn set_vector3_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.cell.set_vector3_array(data, count);
    }

    /// Reference `count` packed vectors of a caller owned array.
    pub fn set_vector4_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.cell.set_vector4_array(data, count);
    }

    /// Store a copy of `value`.
    pub fn set_matrix(&mut self, value: &Matrix4<f32>) {
        self.cell.set_matrix(value);
    }

    /// Reference `count` packed column major matrices of a caller owned array.
    pub fn set_matrix_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.cell.set_matrix_array(data, count);
    }

    /// Share `sampler`.
    pub fn set_sampler(&mut self, sampler: SamplerRef) {
        self.cell.set_sampler(sampler);
    }

    /// Create a sampler for the texture at `path` and store it.
    pub fn set_texture<S: Into<String>>(&mut self, path: S, mipmaps: bool) -> SamplerRef {
        let sampler = TextureSampler::new(path, mipmaps).into_ref();
        self.cell.set_sampler(sampler.clone());
        sampler
    }

    /// Compute the value with `method` at bind time.
    pub fn set_method(&mut self, method: MethodRef) {
        self.cell.set_method(method);
    }

    /// Read the value from the accessor `accessor` of `node`.
    ///
    /// Unknown accessor names leave the value untouched and return
    /// [`MaterialError::UnknownNodeAccessor`]. The accessor table is closed, so this is a
    /// misconfigured material: report it, do not retry the binding or ignore the error.
    pub fn bind_value(&mut self, node: NodeRef, accessor: &str) -> Result<(), MaterialError> {
        let binding = NodeBinding::new(node, accessor)?;
        self.cell.set_computed(binding);
        Ok(())
    }

    /// Read a node bound value again. Other kinds are left alone.
    pub fn refresh(&mut self) {
        if let Value::Computed(binding) = self.cell.value_mut() {
            binding.refresh();
        }
    }

    /// Upload the value to the uniform of `effect` with the parameter's name.
    ///
    /// An effect without such a uniform is not an error, the parameter is skipped.
    pub fn bind(&mut self, effect: &mut dyn Effect) -> Result<(), Error> {
        let id = effect.id();
        if self.uniform.as_ref().map_or(true, |u| u.effect() != id) {
            if self.uniform.is_some() {
                debug!(
                    "Effect of material parameter '{}' changed, resolving uniform again",
                    self.name
                );
            }
            self.uniform = effect.uniform(&self.name);
        }

        match &self.uniform {
            Some(uniform) => upload(effect, uniform, &self.cell)?,
            None => warn!(
                "Material parameter for uniform '{}' not found in effect: '{}'",
                self.name,
                effect.name()
            ),
        }
        Ok(())
    }

    /// Copy name, value and uniform handle into `other`.
    ///
    /// Values the parameter owns are copied, shared arrays are aliased and shared handles gain a
    /// reference.
    pub fn clone_into(&self, other: &mut MaterialParameter) {
        other.name.clone_from(&self.name);
        other.uniform.clone_from(&self.uniform);

        let value = match self.cell.value() {
            Value::None => Value::None,
            Value::Float(v) => Value::Float(*v),
            Value::Int(v) => Value::Int(*v),
            Value::FloatArray { data, count } => Value::FloatArray {
                data: data.clone(),
                count: *count,
            },
            Value::IntArray { data, count } => Value::IntArray {
                data: data.clone(),
                count: *count,
            },
            Value::Vector2(storage) => Value::Vector2(clone_storage(storage)),
            Value::Vector3(storage) => Value::Vector3(clone_storage(storage)),
            Value::Vector4(storage) => Value::Vector4(clone_storage(storage)),
            Value::Matrix(storage) => Value::Matrix(clone_storage(storage)),
            Value::Sampler(sampler) => Value::Sampler(sampler.clone()),
            Value::Method(method) => Value::Method(method.clone()),
            Value::Computed(binding) => Value::Computed(binding.clone()),
        };
        other.cell.clear();
        *other.cell.value_mut() = value;
    }
}

fn clone_storage(storage: &FloatStorage) -> FloatStorage {
    match storage {
        FloatStorage::Owned(buf) => FloatStorage::Owned(buf.clone()),
        FloatStorage::Shared { data, count } => FloatStorage::Shared {
            data: data.clone(),
            count: *count,
        },
    }
}
