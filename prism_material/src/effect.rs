//! Interface of the shader effect collaborator.
//!
//! Effects own their uniforms. A parameter only keeps a [`Uniform`] handle, which records the
//! [`EffectId`] it was resolved against so it can tell when it went stale.

use std::{
    slice::ChunksExact,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::sampler::SamplerRef;

static NEXT_EFFECT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a compiled effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

impl EffectId {
    /// Allocate an id no other effect in this process uses.
    pub fn next() -> Self {
        EffectId(NEXT_EFFECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a uniform slot of an effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uniform {
    name: String,
    location: u32,
    effect: EffectId,
}

impl Uniform {
    /// Create a handle for the uniform at `location` of `effect`.
    pub fn new<S: Into<String>>(name: S, location: u32, effect: EffectId) -> Self {
        Uniform {
            name: name.into(),
            location,
            effect,
        }
    }

    /// Name of the uniform in the shader source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the uniform within its effect.
    pub fn location(&self) -> u32 {
        self.location
    }

    /// Effect the uniform belongs to.
    pub fn effect(&self) -> EffectId {
        self.effect
    }
}

/// A flat float buffer viewed as `count` elements of `arity` floats each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementView<'a> {
    data: &'a [f32],
    arity: usize,
}

impl<'a> ElementView<'a> {
    /// View the first `count` elements of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `arity` is zero or `data` holds fewer than `count * arity` floats.
    pub fn new(data: &'a [f32], arity: usize, count: usize) -> Self {
        assert!(arity > 0, "element arity must be positive");
        let len = arity * count;
        assert!(
            data.len() >= len,
            "buffer of {} floats cannot hold {} elements of {}",
            data.len(),
            count,
            arity
        );
        ElementView {
            data: &data[..len],
            arity,
        }
    }

    /// Floats per element.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.data.len() / self.arity
    }

    /// The viewed floats, `count * arity` long.
    pub fn as_flat(&self) -> &'a [f32] {
        self.data
    }

    /// Element `index`, `arity` floats long.
    pub fn element(&self, index: usize) -> &'a [f32] {
        &self.data[index * self.arity..(index + 1) * self.arity]
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> ChunksExact<'a, f32> {
        self.data.chunks_exact(self.arity)
    }
}

/// A value uploaded to a uniform.
#[derive(Debug, Clone, Copy)]
pub enum UniformValue<'a> {
    /// Single float
    Float(f32),
    /// Single int
    Int(i32),
    /// Array of floats
    FloatArray(&'a [f32]),
    /// Array of ints
    IntArray(&'a [i32]),
    /// Array of 2 component vectors
    Vector2(ElementView<'a>),
    /// Array of 3 component vectors
    Vector3(ElementView<'a>),
    /// Array of 4 component vectors
    Vector4(ElementView<'a>),
    /// Array of column major 4x4 matrices
    Matrix(ElementView<'a>),
    /// Texture sampler
    Sampler(&'a SamplerRef),
}

/// A compiled shader effect exposing named uniforms.
pub trait Effect {
    /// Identity used to detect stale uniform handles.
    fn id(&self) -> EffectId;

    /// Human readable name for diagnostics.
    fn name(&self) -> &str;

    /// Look up the uniform called `name`.
    fn uniform(&self, name: &str) -> Option<Uniform>;

    /// Upload `value` to `uniform`.
    fn set_value(&mut self, uniform: &Uniform, value: UniformValue<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_ids_are_unique() {
        assert_ne!(EffectId::next(), EffectId::next());
    }

    #[test]
    fn view_splits_elements() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let view = ElementView::new(&data, 3, 2);

        assert_eq!(2, view.count());
        assert_eq!(&[4.0, 5.0, 6.0], view.element(1));
        assert_eq!(6, view.as_flat().len());
        assert_eq!(
            vec![&[1.0, 2.0, 3.0][..], &[4.0, 5.0, 6.0][..]],
            view.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    #[should_panic]
    fn view_rejects_short_buffer() {
        ElementView::new(&[1.0, 2.0], 3, 1);
    }
}
