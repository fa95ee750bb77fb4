//! Scene nodes.
//!
//! A node owns a local [`Transform`], may hang below a parent node and may reference the scene's
//! active camera node. Nodes are shared between the scene and anything bound to their live state,
//! so they are handed around as [`NodeRef`].

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use log::warn;
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::transform::Transform;

/// Shared handle to a node.
pub type NodeRef = Rc<RefCell<Node>>;

/// A named element of the scene hierarchy.
#[derive(Default)]
pub struct Node {
    id: String,
    transform: Transform,
    parent: Option<Weak<RefCell<Node>>>,
    camera: Option<Weak<RefCell<Node>>>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("transform", &self.transform)
            .field("has_parent", &self.parent().is_some())
            .field("has_camera", &self.active_camera().is_some())
            .finish()
    }
}

impl Node {
    /// Create a node with an identity transform.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Node {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Wrap the node into a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    /// Identifier of the node.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Local transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Attach this node below `parent`. The parent is not kept alive by the child.
    pub fn set_parent(&mut self, parent: Option<&NodeRef>) {
        self.parent = parent.map(Rc::downgrade);
    }

    /// The parent node, if it is set and still alive.
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Set the camera node whose view is used for the view space accessors.
    pub fn set_active_camera(&mut self, camera: Option<&NodeRef>) {
        self.camera = camera.map(Rc::downgrade);
    }

    /// The active camera node, if it is set and still alive.
    pub fn active_camera(&self) -> Option<NodeRef> {
        self.camera.as_ref().and_then(Weak::upgrade)
    }

    /// Local to world matrix, combining the transforms of all ancestors.
    pub fn world_matrix(&self) -> Matrix4<f32> {
        match self.parent() {
            Some(parent) => parent.borrow().world_matrix() * self.transform.matrix(),
            None => self.transform.matrix(),
        }
    }

    /// World to view matrix of the active camera, identity without a camera.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let camera = match self.active_camera() {
            Some(camera) => camera,
            None => return Matrix4::identity(),
        };
        let camera = camera.borrow();
        let view = camera.world_matrix().try_inverse();
        view.unwrap_or_else(|| {
            warn!("World matrix of camera node '{}' is not invertible", camera.id);
            Matrix4::identity()
        })
    }

    /// Local x translation.
    pub fn translation_x(&self) -> f32 {
        self.transform.translation().x
    }

    /// Local y translation.
    pub fn translation_y(&self) -> f32 {
        self.transform.translation().y
    }

    /// Local z translation.
    pub fn translation_z(&self) -> f32 {
        self.transform.translation().z
    }

    /// Local x scale.
    pub fn scale_x(&self) -> f32 {
        self.transform.scale().x
    }

    /// Local y scale.
    pub fn scale_y(&self) -> f32 {
        self.transform.scale().y
    }

    /// Local z scale.
    pub fn scale_z(&self) -> f32 {
        self.transform.scale().z
    }

    /// Local forward direction.
    pub fn forward_vector(&self) -> Vector3<f32> {
        self.transform.forward()
    }

    /// Local back direction.
    pub fn back_vector(&self) -> Vector3<f32> {
        -self.transform.forward()
    }

    /// Local up direction.
    pub fn up_vector(&self) -> Vector3<f32> {
        self.transform.up()
    }

    /// Local down direction.
    pub fn down_vector(&self) -> Vector3<f32> {
        -self.transform.up()
    }

    /// Local right direction.
    pub fn right_vector(&self) -> Vector3<f32> {
        self.transform.right()
    }

    /// Local left direction.
    pub fn left_vector(&self) -> Vector3<f32> {
        -self.transform.right()
    }

    /// Forward direction in world space. Not normalized when the hierarchy is scaled.
    pub fn forward_vector_world(&self) -> Vector3<f32> {
        transform_vector(&self.world_matrix(), -Vector3::z())
    }

    /// Up direction in world space.
    pub fn up_vector_world(&self) -> Vector3<f32> {
        transform_vector(&self.world_matrix(), Vector3::y())
    }

    /// Right direction in world space.
    pub fn right_vector_world(&self) -> Vector3<f32> {
        transform_vector(&self.world_matrix(), Vector3::x())
    }

    /// Forward direction in the view space of the active camera.
    pub fn forward_vector_view(&self) -> Vector3<f32> {
        transform_vector(&(self.view_matrix() * self.world_matrix()), -Vector3::z())
    }

    /// Origin of the node in world space.
    pub fn translation_world(&self) -> Vector3<f32> {
        let m = self.world_matrix();
        Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }

    /// Origin of the node in the view space of the active camera.
    pub fn translation_view(&self) -> Vector3<f32> {
        transform_point(&self.view_matrix(), self.translation_world())
    }

    /// World space position of the active camera, zero without a camera.
    pub fn active_camera_translation_world(&self) -> Vector3<f32> {
        self.active_camera()
            .map(|camera| camera.borrow().translation_world())
            .unwrap_or_else(Vector3::zeros)
    }

    /// View space position of the active camera, zero without a camera.
    pub fn active_camera_translation_view(&self) -> Vector3<f32> {
        match self.active_camera() {
            Some(camera) => {
                transform_point(&self.view_matrix(), camera.borrow().translation_world())
            }
            None => Vector3::zeros(),
        }
    }
}

fn transform_vector(m: &Matrix4<f32>, v: Vector3<f32>) -> Vector3<f32> {
    let h = m * Vector4::new(v.x, v.y, v.z, 0.0);
    Vector3::new(h.x, h.y, h.z)
}

fn transform_point(m: &Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
    let h = m * Vector4::new(p.x, p.y, p.z, 1.0);
    Vector3::new(h.x, h.y, h.z)
}
