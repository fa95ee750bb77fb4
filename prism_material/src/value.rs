//! Storage of a single parameter value.
//!
//! A [`ValueCell`] holds exactly one [`Value`]. Single vectors and matrices are copied into a
//! buffer the cell owns, arrays are shared with the caller through an [`ArrayRef`] and never
//! copied. Replacing or clearing the value drops the previous payload, which frees owned buffers
//! and releases shared references exactly once.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

use prism_core::nalgebra::{Matrix4, Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::{method::MethodRef, node_binding::NodeBinding, sampler::SamplerRef};

/// Caller owned array a parameter can reference without copying.
///
/// Elements can be read and written through any handle, but the length is fixed when the array
/// is created, so a parameter referencing it stays in bounds.
#[derive(Debug)]
pub struct ArrayRef<T> {
    data: Rc<RefCell<Box<[T]>>>,
}

impl<T> ArrayRef<T> {
    /// Share `values`.
    pub fn new(values: Vec<T>) -> Self {
        ArrayRef {
            data: Rc::new(RefCell::new(values.into_boxed_slice())),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the elements.
    ///
    /// # Panics
    ///
    /// Panics if the elements are currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, [T]> {
        Ref::map(self.data.borrow(), |data| &**data)
    }

    /// Borrow the elements mutably.
    ///
    /// # Panics
    ///
    /// Panics if the elements are currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, [T]> {
        RefMut::map(self.data.borrow_mut(), |data| &mut **data)
    }

    /// Whether both handles reference the same array.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.data, &other.data)
    }

    /// Number of handles to the array.
    pub fn strong_count(this: &Self) -> usize {
        Rc::strong_count(&this.data)
    }
}

impl<T> Clone for ArrayRef<T> {
    fn clone(&self) -> Self {
        ArrayRef {
            data: self.data.clone(),
        }
    }
}

/// Wrap `values` into an [`ArrayRef`].
pub fn array<T>(values: Vec<T>) -> ArrayRef<T> {
    ArrayRef::new(values)
}

/// Kind of value held by a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// No value.
    None,
    /// One or more floats.
    Float,
    /// One or more ints.
    Int,
    /// One or more 2 component vectors.
    Vector2,
    /// One or more 3 component vectors.
    Vector3,
    /// One or more 4 component vectors.
    Vector4,
    /// One or more 4x4 matrices.
    Matrix,
    /// Texture sampler.
    Sampler,
    /// Value computed by a method at bind time.
    Method,
    /// Value read from a node accessor.
    ComputedBinding,
}

impl ValueKind {
    /// Floats per element for the float backed kinds, zero otherwise.
    pub fn arity(self) -> usize {
        match self {
            ValueKind::Float | ValueKind::Int => 1,
            ValueKind::Vector2 => 2,
            ValueKind::Vector3 => 3,
            ValueKind::Vector4 => 4,
            ValueKind::Matrix => 16,
            ValueKind::None | ValueKind::Sampler | ValueKind::Method | ValueKind::ComputedBinding => 0,
        }
    }
}

/// Backing buffer of vector and matrix values.
#[derive(Debug)]
pub enum FloatStorage {
    /// Buffer allocated and owned by the cell, holding a single element.
    Owned(Box<[f32]>),
    /// Caller owned buffer holding `count` elements.
    Shared {
        /// The referenced buffer.
        data: ArrayRef<f32>,
        /// Number of elements in use.
        count: usize,
    },
}

impl FloatStorage {
    fn count(&self, arity: usize) -> usize {
        match self {
            FloatStorage::Owned(buf) => buf.len() / arity,
            FloatStorage::Shared { count, .. } => *count,
        }
    }

    /// Run `f` with the flat floats in use, `count * arity` long.
    pub fn with_floats<R>(&self, arity: usize, f: impl FnOnce(&[f32]) -> R) -> R {
        match self {
            FloatStorage::Owned(buf) => f(buf),
            FloatStorage::Shared { data, count } => f(&data.borrow()[..count * arity]),
        }
    }

    /// Run `f` with the flat floats in use, mutably.
    pub fn with_floats_mut<R>(&mut self, arity: usize, f: impl FnOnce(&mut [f32]) -> R) -> R {
        match self {
            FloatStorage::Owned(buf) => f(buf),
            FloatStorage::Shared { data, count } => f(&mut data.borrow_mut()[..*count * arity]),
        }
    }
}

/// The payload of a cell.
#[derive(Debug)]
pub enum Value {
    /// No value.
    None,
    /// Single float.
    Float(f32),
    /// Single int.
    Int(i32),
    /// Shared float array.
    FloatArray {
        /// The referenced buffer.
        data: ArrayRef<f32>,
        /// Number of floats in use.
        count: usize,
    },
    /// Shared int array.
    IntArray {
        /// The referenced buffer.
        data: ArrayRef<i32>,
        /// Number of ints in use.
        count: usize,
    },
    /// 2 component vectors.
    Vector2(FloatStorage),
    /// 3 component vectors.
    Vector3(FloatStorage),
    /// 4 component vectors.
    Vector4(FloatStorage),
    /// Column major 4x4 matrices.
    Matrix(FloatStorage),
    /// Texture sampler.
    Sampler(SamplerRef),
    /// Method computing the value at bind time.
    Method(MethodRef),
    /// Value read from a node accessor.
    Computed(NodeBinding),
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl Value {
    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::None => ValueKind::None,
            Value::Float(_) | Value::FloatArray { .. } => ValueKind::Float,
            Value::Int(_) | Value::IntArray { .. } => ValueKind::Int,
            Value::Vector2(_) => ValueKind::Vector2,
            Value::Vector3(_) => ValueKind::Vector3,
            Value::Vector4(_) => ValueKind::Vector4,
            Value::Matrix(_) => ValueKind::Matrix,
            Value::Sampler(_) => ValueKind::Sampler,
            Value::Method(_) => ValueKind::Method,
            Value::Computed(_) => ValueKind::ComputedBinding,
        }
    }
}

/// Tagged storage for one parameter value.
#[derive(Debug, Default)]
pub struct ValueCell {
    value: Value,
}

impl ValueCell {
    /// An empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current payload.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Kind of the current payload.
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Number of logical elements stored, 1 for scalars and non-array kinds.
    pub fn count(&self) -> usize {
        match &self.value {
            Value::FloatArray { count, .. } | Value::IntArray { count, .. } => *count,
            Value::Vector2(s) => s.count(2),
            Value::Vector3(s) => s.count(3),
            Value::Vector4(s) => s.count(4),
            Value::Matrix(s) => s.count(16),
            _ => 1,
        }
    }

    /// Whether the cell allocated the buffer backing its value.
    pub fn owns_storage(&self) -> bool {
        match &self.value {
            Value::Vector2(FloatStorage::Owned(_))
            | Value::Vector3(FloatStorage::Owned(_))
            | Value::Vector4(FloatStorage::Owned(_))
            | Value::Matrix(FloatStorage::Owned(_)) => true,
            _ => false,
        }
    }

    /// Release the current payload and reset to [`ValueKind::None`].
    pub fn clear(&mut self) {
        self.value = Value::None;
    }

    fn replace(&mut self, value: Value) {
        self.clear();
        self.value = value;
    }

    /// Store a single float.
    pub fn set_float(&mut self, value: f32) {
        self.replace(Value::Float(value));
    }

    /// Store a single int.
    pub fn set_int(&mut self, value: i32) {
        self.replace(Value::Int(value));
    }

    /// Reference the first `count` floats of `data`.
    pub fn set_float_array(&mut self, data: ArrayRef<f32>, count: usize) {
        check_array(data.len(), 1, count);
        self.replace(Value::FloatArray { data, count });
    }

    /// Reference the first `count` ints of `data`.
    pub fn set_int_array(&mut self, data: ArrayRef<i32>, count: usize) {
        check_array(data.len(), 1, count);
        self.replace(Value::IntArray { data, count });
    }

    /// Copy a single vector into an owned buffer.
    pub fn set_vector2(&mut self, value: &Vector2<f32>) {
        self.replace(Value::Vector2(owned(value.as_slice())));
    }

    /// Copy a single vector into an owned buffer.
    pub fn set_vector3(&mut self, value: &Vector3<f32>) {
        self.replace(Value::Vector3(owned(value.as_slice())));
    }

    /// Copy a single vector into an owned buffer.
    pub fn set_vector4(&mut self, value: &Vector4<f32>) {
        self.replace(Value::Vector4(owned(value.as_slice())));
    }

    /// Reference `count` vectors packed in `data`.
    pub fn set_vector2_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.replace(Value::Vector2(shared(data, 2, count)));
    }

    /// Reference `count` vectors packed in `data`.
    pub fn set_vector3_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.replace(Value::Vector3(shared(data, 3, count)));
    }

    /// Reference `count` vectors packed in `data`.
    pub fn set_vector4_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.replace(Value::Vector4(shared(data, 4, count)));
    }

    /// Copy a single matrix into an owned buffer.
    ///
    /// A cell already owning exactly one matrix is overwritten in place.
    pub fn set_matrix(&mut self, value: &Matrix4<f32>) {
        if let Value::Matrix(FloatStorage::Owned(buf)) = &mut self.value {
            buf.copy_from_slice(value.as_slice());
            return;
        }
        self.replace(Value::Matrix(owned(value.as_slice())));
    }

    /// Reference `count` column major matrices packed in `data`.
    pub fn set_matrix_array(&mut self, data: ArrayRef<f32>, count: usize) {
        self.replace(Value::Matrix(shared(data, 16, count)));
    }

    /// Share `sampler`.
    pub fn set_sampler(&mut self, sampler: SamplerRef) {
        self.replace(Value::Sampler(sampler));
    }

    /// Share `method`.
    pub fn set_method(&mut self, method: MethodRef) {
        self.replace(Value::Method(method));
    }

    /// Read the value from a node accessor.
    pub fn set_computed(&mut self, binding: NodeBinding) {
        self.replace(Value::Computed(binding));
    }

    /// Number of flat float channels exposed for animation.
    ///
    /// Matrices, samplers, methods and node bindings are not animatable and report zero.
    pub fn channel_count(&self) -> usize {
        match self.kind() {
            kind @ ValueKind::Float
            | kind @ ValueKind::Int
            | kind @ ValueKind::Vector2
            | kind @ ValueKind::Vector3
            | kind @ ValueKind::Vector4 => kind.arity() * self.count(),
            _ => 0,
        }
    }
}

fn owned(values: &[f32]) -> FloatStorage {
    FloatStorage::Owned(values.to_vec().into_boxed_slice())
}

fn shared(data: ArrayRef<f32>, arity: usize, count: usize) -> FloatStorage {
    check_array(data.len(), arity, count);
    FloatStorage::Shared { data, count }
}

fn check_array(len: usize, arity: usize, count: usize) {
    assert!(count > 0, "array values need at least one element");
    assert!(
        len >= count * arity,
        "array of {} values cannot hold {} elements of {}",
        len,
        count,
        arity
    );
}
