//! Table of node accessors a parameter can be bound to.
//!
//! The table is closed: material files name an accessor, and any name outside of it is a
//! configuration error.

use derivative::Derivative;
use fnv::FnvHashMap;
use lazy_static::lazy_static;
use prism_core::{nalgebra::Vector3, Node, NodeRef};
use std::fmt;

use crate::error::MaterialError;

/// Qualifier material files may put in front of an accessor name.
const NODE_QUALIFIER: &str = "&Node::";

/// A typed zero-argument accessor on a node.
#[derive(Clone, Copy)]
pub enum NodeAccessor {
    /// Accessor returning a single float.
    Scalar(fn(&Node) -> f32),
    /// Accessor returning a 3 component vector.
    Vector3(fn(&Node) -> Vector3<f32>),
}

impl fmt::Debug for NodeAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeAccessor::Scalar(_) => f.write_str("NodeAccessor::Scalar"),
            NodeAccessor::Vector3(_) => f.write_str("NodeAccessor::Vector3"),
        }
    }
}

impl NodeAccessor {
    /// Number of floats the accessor produces.
    pub fn arity(self) -> usize {
        match self {
            NodeAccessor::Scalar(_) => 1,
            NodeAccessor::Vector3(_) => 3,
        }
    }

    /// Read the accessor into the first `arity` floats of `out`.
    pub fn read(self, node: &Node, out: &mut [f32]) {
        match self {
            NodeAccessor::Scalar(get) => out[0] = get(node),
            NodeAccessor::Vector3(get) => out[..3].copy_from_slice(get(node).as_slice()),
        }
    }
}

lazy_static! {
    static ref NODE_ACCESSORS: FnvHashMap<&'static str, NodeAccessor> = {
        use self::NodeAccessor::{Scalar, Vector3 as Vec3};

        let mut map = FnvHashMap::default();
        map.insert("getBackVector", Vec3(Node::back_vector));
        map.insert("getDownVector", Vec3(Node::down_vector));
        map.insert("getTranslationWorld", Vec3(Node::translation_world));
        map.insert("getTranslationView", Vec3(Node::translation_view));
        map.insert("getForwardVector", Vec3(Node::forward_vector));
        map.insert("getForwardVectorWorld", Vec3(Node::forward_vector_world));
        map.insert("getForwardVectorView", Vec3(Node::forward_vector_view));
        map.insert("getLeftVector", Vec3(Node::left_vector));
        map.insert("getRightVector", Vec3(Node::right_vector));
        map.insert("getRightVectorWorld", Vec3(Node::right_vector_world));
        map.insert("getUpVector", Vec3(Node::up_vector));
        map.insert("getUpVectorWorld", Vec3(Node::up_vector_world));
        map.insert(
            "getActiveCameraTranslationWorld",
            Vec3(Node::active_camera_translation_world),
        );
        map.insert(
            "getActiveCameraTranslationView",
            Vec3(Node::active_camera_translation_view),
        );
        map.insert("getScaleX", Scalar(Node::scale_x));
        map.insert("getScaleY", Scalar(Node::scale_y));
        map.insert("getScaleZ", Scalar(Node::scale_z));
        map.insert("getTranslationX", Scalar(Node::translation_x));
        map.insert("getTranslationY", Scalar(Node::translation_y));
        map.insert("getTranslationZ", Scalar(Node::translation_z));
        map
    };
}

/// Resolve an accessor name, with or without the `&Node::` qualifier.
pub fn lookup(name: &str) -> Result<(&'static str, NodeAccessor), MaterialError> {
    let key = name.trim();
    let key = if key.starts_with(NODE_QUALIFIER) {
        &key[NODE_QUALIFIER.len()..]
    } else {
        key
    };
    NODE_ACCESSORS
        .get_key_value(key)
        .map(|(name, accessor)| (*name, *accessor))
        .ok_or_else(|| MaterialError::UnknownNodeAccessor(name.to_string()))
}

/// Names of every accessor in the table.
pub fn accessor_names() -> impl Iterator<Item = &'static str> {
    NODE_ACCESSORS.keys().cloned()
}

/// A parameter value read from a node accessor.
///
/// The last read is cached, `refresh` reads the node again.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct NodeBinding {
    #[derivative(Debug = "ignore")]
    node: NodeRef,
    name: &'static str,
    accessor: NodeAccessor,
    cache: Box<[f32]>,
}

impl NodeBinding {
    /// Bind to the accessor `name` of `node` and read it once.
    pub fn new(node: NodeRef, name: &str) -> Result<Self, MaterialError> {
        let (name, accessor) = lookup(name)?;
        let mut binding = NodeBinding {
            node,
            name,
            accessor,
            cache: vec![0.0; accessor.arity()].into_boxed_slice(),
        };
        binding.refresh();
        Ok(binding)
    }

    /// Read the node accessor into the cache.
    pub fn refresh(&mut self) {
        self.accessor.read(&self.node.borrow(), &mut self.cache);
    }

    /// The bound node.
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Accessor name, without qualifier.
    pub fn accessor_name(&self) -> &'static str {
        self.name
    }

    /// The accessor itself.
    pub fn accessor(&self) -> NodeAccessor {
        self.accessor
    }

    /// Floats produced by the accessor.
    pub fn arity(&self) -> usize {
        self.accessor.arity()
    }

    /// Values of the last refresh.
    pub fn values(&self) -> &[f32] {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete() {
        assert_eq!(20, accessor_names().count());
        assert_eq!(3, lookup("getUpVectorWorld").unwrap().1.arity());
        assert_eq!(1, lookup("getTranslationZ").unwrap().1.arity());
    }

    #[test]
    fn qualified_names_resolve() {
        let (name, accessor) = lookup("&Node::getScaleY").expect("known accessor");
        assert_eq!("getScaleY", name);
        assert_eq!(1, accessor.arity());
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            Err(MaterialError::UnknownNodeAccessor("bogusAccessor".into())),
            lookup("bogusAccessor").map(|(name, _)| name)
        );
        assert!(lookup("getscalex").is_err());
    }

    #[test]
    fn binding_follows_node() {
        let node = Node::new("lamp").into_ref();
        node.borrow_mut()
            .transform_mut()
            .set_translation_xyz(1.0, 2.0, 3.0);

        let mut binding = NodeBinding::new(node.clone(), "getTranslationWorld").unwrap();
        assert_eq!(&[1.0, 2.0, 3.0], binding.values());

        node.borrow_mut().transform_mut().set_translation_xyz(4.0, 5.0, 6.0);
        assert_eq!(&[1.0, 2.0, 3.0], binding.values());
        binding.refresh();
        assert_eq!(&[4.0, 5.0, 6.0], binding.values());
    }
}
