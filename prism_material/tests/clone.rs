use std::rc::Rc;

use prism_core::{nalgebra::Vector3, Node};
use prism_material::{
    array, AnimationTarget, AnimationValue, ArrayRef, FloatStorage, MaterialParameter,
    ParameterProperty::Uniform, Value,
};
use prism_test::RecordingEffect;

fn vector3(param: &MaterialParameter) -> Vec<f32> {
    match param.cell().value() {
        Value::Vector3(storage) => storage.with_floats(3, <[f32]>::to_vec),
        other => panic!("unexpected value {:?}", other),
    }
}

#[test]
fn single_vector_is_copied() {
    let mut original = MaterialParameter::new("u_color");
    original.set_vector3(&Vector3::new(1.0, 2.0, 3.0));

    let mut clone = MaterialParameter::new("");
    original.clone_into(&mut clone);
    assert_eq!("u_color", clone.name());
    assert_eq!(vector3(&original), vector3(&clone));
    assert!(clone.cell().owns_storage());

    clone.apply_value(Uniform, &AnimationValue::from(vec![9.0, 9.0, 9.0]), 1.0);
    assert_eq!(vec![1.0, 2.0, 3.0], vector3(&original));
    assert_eq!(vec![9.0, 9.0, 9.0], vector3(&clone));
}

#[test]
fn arrays_are_aliased() {
    let data = array(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let mut original = MaterialParameter::new("u_points");
    original.set_vector3_array(data.clone(), 2);

    let mut clone = MaterialParameter::new("u_points");
    original.clone_into(&mut clone);
    assert_eq!(3, ArrayRef::strong_count(&data));
    assert!(!clone.cell().owns_storage());
    match clone.cell().value() {
        Value::Vector3(FloatStorage::Shared { data: shared, count }) => {
            assert!(ArrayRef::ptr_eq(&data, shared));
            assert_eq!(2, *count);
        }
        other => panic!("unexpected value {:?}", other),
    }

    clone.apply_value(Uniform, &AnimationValue::from(vec![0.0; 6]), 1.0);
    assert_eq!(vec![0.0; 6], vector3(&original));
}

#[test]
fn shared_handles_gain_a_reference() {
    let node = Node::new("lamp").into_ref();
    let mut texture = MaterialParameter::new("u_texture");
    let sampler = texture.set_texture("res/brick.png", true);
    let mut position = MaterialParameter::new("u_position");
    position.bind_value(node.clone(), "getTranslationView").unwrap();

    let mut texture_clone = MaterialParameter::new("");
    texture.clone_into(&mut texture_clone);
    let mut position_clone = MaterialParameter::new("");
    position.clone_into(&mut position_clone);

    assert_eq!(3, Rc::strong_count(&sampler));
    assert_eq!(3, Rc::strong_count(&node));

    drop(texture_clone);
    assert_eq!(2, Rc::strong_count(&sampler));
}

#[test]
fn cached_uniform_is_copied() {
    let mut effect = RecordingEffect::new("lit", &["u_ambient"]);
    let mut original = MaterialParameter::new("u_ambient");
    original.set_float(0.2);
    original.bind(&mut effect).unwrap();

    let mut clone = MaterialParameter::new("");
    original.clone_into(&mut clone);
    assert_eq!(original.uniform(), clone.uniform());

    clone.bind(&mut effect).unwrap();
    assert_eq!(1, effect.lookups());
}
