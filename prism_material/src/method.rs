//! Procedural parameter values.
//!
//! A method computes its value when the parameter is bound and uploads it itself, so the
//! parameter does not need to know what kind of value it produces.

use std::{fmt, marker::PhantomData, rc::Rc};

use prism_core::nalgebra::{Matrix4, Vector2, Vector3, Vector4};

use crate::effect::{Effect, ElementView, Uniform, UniformValue};

/// Shared handle to a method. Parameters hold one strong reference each.
pub type MethodRef = Rc<dyn MaterialMethod>;

/// A value computed at bind time.
pub trait MaterialMethod {
    /// Compute the value and upload it to `uniform`.
    fn set_value(&self, effect: &mut dyn Effect, uniform: &Uniform);
}

impl fmt::Debug for dyn MaterialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MaterialMethod")
    }
}

/// Values a method may produce.
pub trait UniformData {
    /// Upload `self` to `uniform`.
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform);
}

impl UniformData for f32 {
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        effect.set_value(uniform, UniformValue::Float(*self));
    }
}

impl UniformData for i32 {
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        effect.set_value(uniform, UniformValue::Int(*self));
    }
}

impl UniformData for Vector2<f32> {
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        effect.set_value(
            uniform,
            UniformValue::Vector2(ElementView::new(self.as_slice(), 2, 1)),
        );
    }
}

impl UniformData for Vector3<f32> {
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        effect.set_value(
            uniform,
            UniformValue::Vector3(ElementView::new(self.as_slice(), 3, 1)),
        );
    }
}

impl UniformData for Vector4<f32> {
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        effect.set_value(
            uniform,
            UniformValue::Vector4(ElementView::new(self.as_slice(), 4, 1)),
        );
    }
}

impl UniformData for Matrix4<f32> {
    fn upload(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        effect.set_value(
            uniform,
            UniformValue::Matrix(ElementView::new(self.as_slice(), 16, 1)),
        );
    }
}

/// Method backed by a getter closure.
pub struct ValueMethod<T, F> {
    getter: F,
    marker: PhantomData<fn() -> T>,
}

impl<T, F> fmt::Debug for ValueMethod<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueMethod").finish()
    }
}

impl<T, F> ValueMethod<T, F>
where
    T: UniformData,
    F: Fn() -> T,
{
    /// Create a method reading its value from `getter`.
    pub fn new(getter: F) -> Self {
        ValueMethod {
            getter,
            marker: PhantomData,
        }
    }
}

impl<T, F> MaterialMethod for ValueMethod<T, F>
where
    T: UniformData,
    F: Fn() -> T,
{
    fn set_value(&self, effect: &mut dyn Effect, uniform: &Uniform) {
        (self.getter)().upload(effect, uniform);
    }
}

/// Shorthand for a shared [`ValueMethod`].
///
/// ```rust
/// # use prism_material::method::method;
/// let time = method(|| 0.5f32);
/// # drop(time);
/// ```
pub fn method<T, F>(getter: F) -> MethodRef
where
    T: UniformData + 'static,
    F: Fn() -> T + 'static,
{
    Rc::new(ValueMethod::new(getter))
}
