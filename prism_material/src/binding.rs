//! Upload of a stored value to a shader uniform.

use log::error;

use crate::{
    effect::{Effect, ElementView, Uniform, UniformValue},
    error::MaterialError,
    value::{FloatStorage, Value, ValueCell, ValueKind},
};

/// Upload the value held by `cell` to `uniform` of `effect`.
///
/// Scalars holding one element go through the single value path, larger counts through the
/// array path. Methods upload themselves. Node bindings upload their last read values.
///
/// An empty cell cannot be uploaded. The attempt is logged and returned as
/// [`MaterialError::UnsupportedKind`], which marks a misconfigured material rather than a
/// transient failure: callers should surface it and never retry the upload or drop the error.
pub fn upload(
    effect: &mut dyn Effect,
    uniform: &Uniform,
    cell: &ValueCell,
) -> Result<(), MaterialError> {
    match cell.value() {
        Value::None => {
            error!(
                "Unsupported material parameter type {:?} for uniform '{}' of effect '{}'",
                cell.kind(),
                uniform.name(),
                effect.name()
            );
            return Err(MaterialError::UnsupportedKind {
                uniform: uniform.name().to_string(),
                kind: cell.kind(),
            });
        }
        Value::Float(v) => effect.set_value(uniform, UniformValue::Float(*v)),
        Value::Int(v) => effect.set_value(uniform, UniformValue::Int(*v)),
        Value::FloatArray { data, count } => {
            let data = data.borrow();
            let value = if *count == 1 {
                UniformValue::Float(data[0])
            } else {
                UniformValue::FloatArray(&data[..*count])
            };
            effect.set_value(uniform, value);
        }
        Value::IntArray { data, count } => {
            let data = data.borrow();
            let value = if *count == 1 {
                UniformValue::Int(data[0])
            } else {
                UniformValue::IntArray(&data[..*count])
            };
            effect.set_value(uniform, value);
        }
        Value::Vector2(storage) => upload_floats(effect, uniform, storage, ValueKind::Vector2),
        Value::Vector3(storage) => upload_floats(effect, uniform, storage, ValueKind::Vector3),
        Value::Vector4(storage) => upload_floats(effect, uniform, storage, ValueKind::Vector4),
        Value::Matrix(storage) => upload_floats(effect, uniform, storage, ValueKind::Matrix),
        Value::Sampler(sampler) => effect.set_value(uniform, UniformValue::Sampler(sampler)),
        Value::Method(method) => method.set_value(effect, uniform),
        Value::Computed(binding) => {
            let values = binding.values();
            let value = if binding.arity() == 1 {
                UniformValue::Float(values[0])
            } else {
                UniformValue::Vector3(ElementView::new(values, 3, 1))
            };
            effect.set_value(uniform, value);
        }
    }
    Ok(())
}

fn upload_floats(
    effect: &mut dyn Effect,
    uniform: &Uniform,
    storage: &FloatStorage,
    kind: ValueKind,
) {
    let arity = kind.arity();
    storage.with_floats(arity, |floats| {
        let view = ElementView::new(floats, arity, floats.len() / arity);
        let value = match kind {
            ValueKind::Vector2 => UniformValue::Vector2(view),
            ValueKind::Vector3 => UniformValue::Vector3(view),
            ValueKind::Vector4 => UniformValue::Vector4(view),
            _ => UniformValue::Matrix(view),
        };
        effect.set_value(uniform, value);
    });
}
