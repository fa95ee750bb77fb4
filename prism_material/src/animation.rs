//! Flat float channel view of parameter values for keyframe animation.
//!
//! Every animatable value is expanded into `count * arity` channels in element order. Samples are
//! blended into the current channels with [`lerp`] and written back into the value cell.

use std::{fmt::Debug, hash::Hash};

use crate::{
    parameter::MaterialParameter,
    value::{Value, ValueCell},
};

/// Linear interpolation from `a` to `b`.
///
/// Mathematically `a + t * (b - a)`, arranged so that `t == 0` yields exactly `a` and `t == 1`
/// exactly `b`. For weights strictly between 0 and 1 the result may differ from evaluating
/// `a + t * (b - a)` in the last bits, typically by 1 ulp.
#[inline]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// A buffer of flat float channels exchanged with an [`AnimationTarget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationValue {
    channels: Vec<f32>,
}

impl AnimationValue {
    /// A zeroed buffer of `component_count` channels.
    pub fn new(component_count: usize) -> Self {
        AnimationValue {
            channels: vec![0.0; component_count],
        }
    }

    /// Number of channels.
    pub fn component_count(&self) -> usize {
        self.channels.len()
    }

    /// The channels.
    pub fn as_slice(&self) -> &[f32] {
        &self.channels
    }

    /// The channels, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.channels
    }

    /// Channel `index`.
    pub fn float(&self, index: usize) -> f32 {
        self.channels[index]
    }

    /// Set channel `index`.
    pub fn set_float(&mut self, index: usize, value: f32) {
        self.channels[index] = value;
    }

    /// Copy channels `offset..offset + len` into the same positions of `out`.
    pub fn floats(&self, out: &mut [f32], offset: usize, len: usize) {
        let range = offset..offset + len;
        out[range.clone()].copy_from_slice(&self.channels[range]);
    }

    /// Copy positions `offset..offset + len` of `values` into the same channels.
    pub fn set_floats(&mut self, values: &[f32], offset: usize, len: usize) {
        let range = offset..offset + len;
        self.channels[range.clone()].copy_from_slice(&values[range]);
    }
}

impl From<Vec<f32>> for AnimationValue {
    fn from(channels: Vec<f32>) -> Self {
        AnimationValue { channels }
    }
}

/// Something exposing animatable properties as float channels.
pub trait AnimationTarget {
    /// Identifies an animatable property of the target.
    type Property: Debug + Clone + Copy + Hash + Eq;

    /// Number of channels of `property`, zero if it cannot be animated.
    fn component_count(&self, property: Self::Property) -> usize;

    /// Read the channels of `property` into the start of `value`.
    fn current_value(&self, property: Self::Property, value: &mut AnimationValue);

    /// Blend `value` into the channels of `property`.
    ///
    /// `blend_weight` of 0 keeps the current channels, 1 replaces them with `value`.
    fn apply_value(&mut self, property: Self::Property, value: &AnimationValue, blend_weight: f32);
}

/// Animatable properties of a [`MaterialParameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterProperty {
    /// The value uploaded to the uniform.
    Uniform,
}

impl AnimationTarget for MaterialParameter {
    type Property = ParameterProperty;

    fn component_count(&self, property: ParameterProperty) -> usize {
        match property {
            ParameterProperty::Uniform => self.cell().channel_count(),
        }
    }

    fn current_value(&self, property: ParameterProperty, value: &mut AnimationValue) {
        match property {
            ParameterProperty::Uniform => read_channels(self.cell(), value.as_mut_slice()),
        }
    }

    fn apply_value(&mut self, property: ParameterProperty, value: &AnimationValue, blend_weight: f32) {
        match property {
            ParameterProperty::Uniform => {
                blend_channels(self.cell_mut(), value.as_slice(), blend_weight)
            }
        }
    }
}

/// Copy the channels of `cell` into the start of `out` in index order.
///
/// # Panics
///
/// Panics if `out` is shorter than the channel count of `cell`.
pub fn read_channels(cell: &ValueCell, out: &mut [f32]) {
    check_buffer(cell, out.len());
    match cell.value() {
        Value::Float(v) => out[0] = *v,
        Value::Int(v) => out[0] = *v as f32,
        Value::FloatArray { data, count } => out[..*count].copy_from_slice(&data.borrow()[..*count]),
        Value::IntArray { data, count } => {
            for (o, v) in out.iter_mut().zip(&data.borrow()[..*count]) {
                *o = *v as f32;
            }
        }
        Value::Vector2(storage) => storage.with_floats(2, |f| out[..f.len()].copy_from_slice(f)),
        Value::Vector3(storage) => storage.with_floats(3, |f| out[..f.len()].copy_from_slice(f)),
        Value::Vector4(storage) => storage.with_floats(4, |f| out[..f.len()].copy_from_slice(f)),
        _ => {}
    }
}

/// Replace every channel `c` of `cell` by `lerp(blend_weight, c, input[i])`.
///
/// Int channels are interpolated as floats and truncated toward zero. Kinds without channels are
/// left untouched.
///
/// # Panics
///
/// Panics if `blend_weight` is outside of `[0, 1]` or `input` is shorter than the channel count.
pub fn blend_channels(cell: &mut ValueCell, input: &[f32], blend_weight: f32) {
    assert!(
        (0.0..=1.0).contains(&blend_weight),
        "blend weight {} outside of [0, 1]",
        blend_weight
    );
    check_buffer(cell, input.len());

    let blend = |current: &mut [f32]| {
        for (c, i) in current.iter_mut().zip(input) {
            *c = lerp(blend_weight, *c, *i);
        }
    };
    match cell.value_mut() {
        Value::Float(v) => *v = lerp(blend_weight, *v, input[0]),
        Value::Int(v) => *v = lerp(blend_weight, *v as f32, input[0]) as i32,
        Value::FloatArray { data, count } => blend(&mut data.borrow_mut()[..*count]),
        Value::IntArray { data, count } => {
            for (c, i) in data.borrow_mut()[..*count].iter_mut().zip(input) {
                *c = lerp(blend_weight, *c as f32, *i) as i32;
            }
        }
        Value::Vector2(storage) => storage.with_floats_mut(2, blend),
        Value::Vector3(storage) => storage.with_floats_mut(3, blend),
        Value::Vector4(storage) => storage.with_floats_mut(4, blend),
        _ => {}
    }
}

fn check_buffer(cell: &ValueCell, len: usize) {
    let channels = cell.channel_count();
    assert!(
        len >= channels,
        "channel buffer of {} floats is shorter than the {} channels of the value",
        len,
        channels
    );
}
