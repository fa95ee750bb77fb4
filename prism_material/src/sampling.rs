//! Keyframe sampling into animation values.

use minterpolate::{InterpolationFunction, InterpolationPrimitive};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationTarget, AnimationValue};

use self::ChannelPrimitive::*;

/// Keyframe output of a single parameter element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChannelPrimitive {
    /// A single value
    Scalar(f32),
    /// Two values
    Vec2([f32; 2]),
    /// Three values
    Vec3([f32; 3]),
    /// Four values
    Vec4([f32; 4]),
}

impl ChannelPrimitive {
    /// The values as channels.
    pub fn as_slice(&self) -> &[f32] {
        match self {
            Scalar(s) => std::slice::from_ref(s),
            Vec2(s) => &s[..],
            Vec3(s) => &s[..],
            Vec4(s) => &s[..],
        }
    }

    /// Number of channels.
    pub fn width(&self) -> usize {
        self.as_slice().len()
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        match (*self, *other) {
            (Scalar(s), Scalar(o)) => Scalar(f(s, o)),
            (Vec2(s), Vec2(o)) => Vec2([f(s[0], o[0]), f(s[1], o[1])]),
            (Vec3(s), Vec3(o)) => Vec3([f(s[0], o[0]), f(s[1], o[1]), f(s[2], o[2])]),
            (Vec4(s), Vec4(o)) => Vec4([
                f(s[0], o[0]),
                f(s[1], o[1]),
                f(s[2], o[2]),
                f(s[3], o[3]),
            ]),
            _ => panic!("Interpolation can not be done between primitives of different types"),
        }
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        match *self {
            Scalar(s) => Scalar(f(s)),
            Vec2(s) => Vec2([f(s[0]), f(s[1])]),
            Vec3(s) => Vec3([f(s[0]), f(s[1]), f(s[2])]),
            Vec4(s) => Vec4([f(s[0]), f(s[1]), f(s[2]), f(s[3])]),
        }
    }
}

impl From<f32> for ChannelPrimitive {
    fn from(value: f32) -> Self {
        Scalar(value)
    }
}

impl From<[f32; 2]> for ChannelPrimitive {
    fn from(arr: [f32; 2]) -> Self {
        Vec2(arr)
    }
}

impl From<[f32; 3]> for ChannelPrimitive {
    fn from(arr: [f32; 3]) -> Self {
        Vec3(arr)
    }
}

impl From<[f32; 4]> for ChannelPrimitive {
    fn from(arr: [f32; 4]) -> Self {
        Vec4(arr)
    }
}

impl InterpolationPrimitive for ChannelPrimitive {
    fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |s, o| s + o)
    }

    fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |s, o| s - o)
    }

    fn mul(&self, scalar: f32) -> Self {
        self.map(|s| s * scalar)
    }

    fn dot(&self, other: &Self) -> f32 {
        self.zip_with(other, |s, o| s * o).as_slice().iter().sum()
    }

    fn magnitude2(&self) -> f32 {
        self.dot(self)
    }

    fn magnitude(&self) -> f32 {
        match *self {
            Scalar(s) => s,
            Vec2(_) | Vec3(_) | Vec4(_) => self.magnitude2().sqrt(),
        }
    }

    fn normalize(&self) -> Self {
        match *self {
            Scalar(_) => *self,
            Vec2(_) | Vec3(_) | Vec4(_) => self.mul(1. / self.magnitude()),
        }
    }
}

/// Keyframes of one animated parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSampler {
    /// Time of key frames
    pub input: Vec<f32>,
    /// Output data to interpolate, laid out as `function` expects
    pub output: Vec<ChannelPrimitive>,
    /// How to interpolate between key frames
    pub function: InterpolationFunction<ChannelPrimitive>,
}

impl ChannelSampler {
    /// Interpolate the keyframes at `time`.
    pub fn sample(&self, time: f32) -> ChannelPrimitive {
        self.function.interpolate(time, &self.input, &self.output, false)
    }

    /// Interpolate the keyframes at `time` into the start of `value`.
    pub fn sample_into(&self, time: f32, value: &mut AnimationValue) {
        let sample = self.sample(time);
        let channels = sample.as_slice();
        value.as_mut_slice()[..channels.len()].copy_from_slice(channels);
    }

    /// Sample at `time` and blend the result into `property` of `target`.
    ///
    /// # Panics
    ///
    /// Panics if the keyframe width differs from the channel count of the property.
    pub fn apply<T>(&self, target: &mut T, property: T::Property, time: f32, blend_weight: f32)
    where
        T: AnimationTarget,
    {
        let sample = self.sample(time);
        let channels = target.component_count(property);
        assert_eq!(
            sample.width(),
            channels,
            "keyframes of width {} cannot drive a property of {} channels",
            sample.width(),
            channels
        );
        let value = AnimationValue::from(sample.as_slice().to_vec());
        target.apply_value(property, &value, blend_weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;

    #[test]
    fn primitive_arithmetic() {
        let a = ChannelPrimitive::from([1.0f32, 2.0]);
        let b = ChannelPrimitive::from([3.0f32, 4.0]);

        assert_eq!(Vec2([4.0, 6.0]), a.add(&b));
        assert_eq!(Vec2([2.0, 2.0]), b.sub(&a));
        assert_eq!(11.0, a.dot(&b));
        assert_ulps_eq!(5.0, b.magnitude());
        assert_eq!(Scalar(-2.0), Scalar(-2.0).normalize());
    }

    #[test]
    fn linear_sampling() {
        let sampler = ChannelSampler {
            input: vec![0.0, 1.0, 2.0],
            output: vec![
                Vec3([0.0, 0.0, 0.0]),
                Vec3([2.0, 4.0, 8.0]),
                Vec3([4.0, 4.0, 4.0]),
            ],
            function: InterpolationFunction::Linear,
        };

        match sampler.sample(0.5) {
            Vec3(v) => {
                assert_ulps_eq!(1.0, v[0]);
                assert_ulps_eq!(2.0, v[1]);
                assert_ulps_eq!(4.0, v[2]);
            }
            other => panic!("unexpected sample {:?}", other),
        }

        let mut value = AnimationValue::new(3);
        sampler.sample_into(1.0, &mut value);
        assert_eq!(&[2.0, 4.0, 8.0], value.as_slice());
    }
}
