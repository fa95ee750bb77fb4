//! Local transform of a scene node.

use getset::Getters;
use nalgebra::{Isometry3, Matrix4, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Local position, rotation, and scale (relative to the parent node if it exists).
///
/// The transforms are performed in this order: scale, then rotation, then translation.
#[derive(Getters, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation + rotation value
    iso: Isometry3<f32>,
    /// Scale vector
    #[get = "pub"]
    scale: Vector3<f32>,
}

impl Transform {
    /// Returns the local object matrix for the transform.
    #[inline]
    pub fn matrix(&self) -> Matrix4<f32> {
        self.iso
            .to_homogeneous()
            .prepend_nonuniform_scaling(&self.scale)
    }

    /// Returns a reference to the translation vector.
    #[inline]
    pub fn translation(&self) -> &Vector3<f32> {
        &self.iso.translation.vector
    }

    /// Set the position.
    pub fn set_translation(&mut self, position: Vector3<f32>) -> &mut Self {
        self.iso.translation.vector = position;
        self
    }

    /// Sets the specified values of the translation vector.
    pub fn set_translation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.set_translation(Vector3::new(x, y, z))
    }

    /// Set the rotation using Euler x, y, z, in radians.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.iso.rotation = UnitQuaternion::from_euler_angles(x, y, z);
        self
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, scale: Vector3<f32>) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Local direction a node faces. Forward is `-Z`, since `+Z` comes towards the viewer.
    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        self.iso.rotation * -Vector3::z()
    }

    /// Local `+Y` rotated by the transform.
    #[inline]
    pub fn up(&self) -> Vector3<f32> {
        self.iso.rotation * Vector3::y()
    }

    /// Local `+X` rotated by the transform.
    #[inline]
    pub fn right(&self) -> Vector3<f32> {
        self.iso.rotation * Vector3::x()
    }
}

impl Default for Transform {
    /// The default transform does nothing when used to transform a node.
    fn default() -> Self {
        Transform {
            iso: Isometry3::identity(),
            scale: Vector3::from_element(1.0),
        }
    }
}
