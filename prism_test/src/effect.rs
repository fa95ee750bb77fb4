use std::cell::Cell;

use prism_material::{Effect, EffectId, SamplerRef, Uniform, UniformValue};

/// Owned copy of an uploaded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    /// Single float
    Float(f32),
    /// Single int
    Int(i32),
    /// Float array
    FloatArray(Vec<f32>),
    /// Int array
    IntArray(Vec<i32>),
    /// Vector array with the number of components of each vector
    Vector {
        /// Components per vector
        arity: usize,
        /// Flat components
        data: Vec<f32>,
    },
    /// Flat column major matrices
    Matrix(Vec<f32>),
    /// Sampler reference
    Sampler(SamplerRef),
}

impl Recorded {
    /// Number of elements uploaded.
    pub fn count(&self) -> usize {
        match self {
            Recorded::Float(_) | Recorded::Int(_) | Recorded::Sampler(_) => 1,
            Recorded::FloatArray(data) => data.len(),
            Recorded::IntArray(data) => data.len(),
            Recorded::Vector { arity, data } => data.len() / arity,
            Recorded::Matrix(data) => data.len() / 16,
        }
    }
}

impl<'a> From<UniformValue<'a>> for Recorded {
    fn from(value: UniformValue<'a>) -> Self {
        match value {
            UniformValue::Float(v) => Recorded::Float(v),
            UniformValue::Int(v) => Recorded::Int(v),
            UniformValue::FloatArray(data) => Recorded::FloatArray(data.to_vec()),
            UniformValue::IntArray(data) => Recorded::IntArray(data.to_vec()),
            UniformValue::Vector2(view) | UniformValue::Vector3(view) | UniformValue::Vector4(view) => {
                Recorded::Vector {
                    arity: view.arity(),
                    data: view.as_flat().to_vec(),
                }
            }
            UniformValue::Matrix(view) => Recorded::Matrix(view.as_flat().to_vec()),
            UniformValue::Sampler(sampler) => Recorded::Sampler(sampler.clone()),
        }
    }
}

/// A single recorded upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Name of the uniform written
    pub uniform: String,
    /// Location of the uniform written
    pub location: u32,
    /// The uploaded value
    pub value: Recorded,
}

/// Effect exposing a fixed list of uniforms and recording what is uploaded to them.
///
/// The location of a uniform is its index in the list.
#[derive(Debug)]
pub struct RecordingEffect {
    id: EffectId,
    name: String,
    uniforms: Vec<String>,
    lookups: Cell<usize>,
    uploads: Vec<Upload>,
}

impl RecordingEffect {
    /// Create an effect called `name` with the given uniforms.
    pub fn new(name: &str, uniforms: &[&str]) -> Self {
        RecordingEffect {
            id: EffectId::next(),
            name: name.to_string(),
            uniforms: uniforms.iter().map(|u| u.to_string()).collect(),
            lookups: Cell::new(0),
            uploads: Vec::new(),
        }
    }

    /// Every upload so far, oldest first.
    pub fn uploads(&self) -> &[Upload] {
        &self.uploads
    }

    /// The latest value uploaded to `uniform`.
    pub fn last_value(&self, uniform: &str) -> Option<&Recorded> {
        self.uploads
            .iter()
            .rev()
            .find(|u| u.uniform == uniform)
            .map(|u| &u.value)
    }

    /// Number of uniform lookups performed on the effect.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Forget the recorded uploads.
    pub fn clear(&mut self) {
        self.uploads.clear();
    }
}

impl Effect for RecordingEffect {
    fn id(&self) -> EffectId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn uniform(&self, name: &str) -> Option<Uniform> {
        self.lookups.set(self.lookups.get() + 1);
        self.uniforms
            .iter()
            .position(|u| u == name)
            .map(|location| Uniform::new(name, location as u32, self.id))
    }

    fn set_value(&mut self, uniform: &Uniform, value: UniformValue<'_>) {
        assert_eq!(
            self.id,
            uniform.effect(),
            "uniform '{}' belongs to another effect",
            uniform.name()
        );
        self.uploads.push(Upload {
            uniform: uniform.name().to_string(),
            location: uniform.location(),
            value: value.into(),
        });
    }
}
