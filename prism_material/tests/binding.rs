use std::rc::Rc;

use log::Level;
use prism_core::{
    nalgebra::{Matrix4, Vector2, Vector3, Vector4},
    Node,
};
use prism_error::Error;
use prism_material::{
    array, method, AnimationTarget, AnimationValue, Effect, MaterialError, MaterialParameter,
    ParameterProperty::Uniform, ValueKind,
};
use prism_test::{capture_logs, Recorded, RecordingEffect};

fn bind(param: &mut MaterialParameter, effect: &mut RecordingEffect) -> Result<(), Error> {
    param.bind(effect)
}

#[test]
fn missing_uniform_is_skipped_with_warning() {
    let mut effect = RecordingEffect::new("textured", &["u_worldViewProjectionMatrix"]);
    let mut param = MaterialParameter::new("lightColor");
    param.set_vector3(&Vector3::new(1.0, 1.0, 1.0));

    let (result, records) = capture_logs(|| bind(&mut param, &mut effect));

    assert!(result.is_ok());
    assert!(effect.uploads().is_empty());
    assert!(param.uniform().is_none());
    assert!(records
        .iter()
        .any(|r| r.level == Level::Warn && r.message.contains("lightColor")));
}

#[test]
fn uniform_is_cached_per_effect() {
    let mut first = RecordingEffect::new("first", &["u_ambientColor"]);
    let mut second = RecordingEffect::new("second", &["u_other", "u_ambientColor"]);
    let mut param = MaterialParameter::new("u_ambientColor");
    param.set_float(0.5);

    bind(&mut param, &mut first).unwrap();
    bind(&mut param, &mut first).unwrap();
    assert_eq!(1, first.lookups());
    assert_eq!(2, first.uploads().len());
    assert_eq!(Some(first.id()), param.uniform().map(|u| u.effect()));

    let (_, records) = capture_logs(|| bind(&mut param, &mut second).unwrap());
    assert_eq!(1, second.lookups());
    assert_eq!(1, second.uploads()[0].location);
    assert_eq!(Some(second.id()), param.uniform().map(|u| u.effect()));
    assert!(records.iter().any(|r| r.level == Level::Debug));
}

#[test]
fn scalars_use_single_or_array_path() {
    let mut effect = RecordingEffect::new("scalars", &["f", "i", "fa", "ia", "f1"]);

    let mut f = MaterialParameter::new("f");
    f.set_float(1.5);
    let mut i = MaterialParameter::new("i");
    i.set_int(7);
    let mut fa = MaterialParameter::new("fa");
    fa.set_float_array(array(vec![1.0, 2.0, 3.0, 9.0]), 3);
    let mut ia = MaterialParameter::new("ia");
    ia.set_int_array(array(vec![4, 5]), 2);
    let mut f1 = MaterialParameter::new("f1");
    f1.set_float_array(array(vec![6.0, 9.0]), 1);

    for param in &mut [f, i, fa, ia, f1] {
        bind(param, &mut effect).unwrap();
    }

    assert_eq!(Some(&Recorded::Float(1.5)), effect.last_value("f"));
    assert_eq!(Some(&Recorded::Int(7)), effect.last_value("i"));
    assert_eq!(
        Some(&Recorded::FloatArray(vec![1.0, 2.0, 3.0])),
        effect.last_value("fa")
    );
    assert_eq!(Some(&Recorded::IntArray(vec![4, 5])), effect.last_value("ia"));
    assert_eq!(Some(&Recorded::Float(6.0)), effect.last_value("f1"));
}

#[test]
fn vectors_and_matrices_upload_with_count() {
    let mut effect = RecordingEffect::new("vectors", &["v2", "v3", "v4", "m", "ma"]);

    let mut v2 = MaterialParameter::new("v2");
    v2.set_vector2(&Vector2::new(1.0, 2.0));
    let mut v3 = MaterialParameter::new("v3");
    v3.set_vector3_array(array(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 2);
    let mut v4 = MaterialParameter::new("v4");
    v4.set_vector4(&Vector4::new(1.0, 2.0, 3.0, 4.0));
    let mut m = MaterialParameter::new("m");
    m.set_matrix(&Matrix4::identity());
    let mut ma = MaterialParameter::new("ma");
    ma.set_matrix_array(array(vec![0.0; 48]), 3);

    for param in &mut [v2, v3, v4, m, ma] {
        bind(param, &mut effect).unwrap();
    }

    assert_eq!(
        Some(&Recorded::Vector {
            arity: 2,
            data: vec![1.0, 2.0]
        }),
        effect.last_value("v2")
    );
    let v3 = effect.last_value("v3").unwrap();
    assert_eq!(2, v3.count());
    assert_eq!(
        &Recorded::Vector {
            arity: 3,
            data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        },
        v3
    );
    assert_eq!(1, effect.last_value("v4").unwrap().count());
    assert_eq!(
        Some(&Recorded::Matrix(Matrix4::identity().as_slice().to_vec())),
        effect.last_value("m")
    );
    assert_eq!(3, effect.last_value("ma").unwrap().count());
}

#[test]
fn sampler_method_and_node_uploads() {
    let mut effect = RecordingEffect::new("mixed", &["tex", "time", "pos", "scale"]);
    let node = Node::new("lamp").into_ref();
    node.borrow_mut()
        .transform_mut()
        .set_translation_xyz(1.0, 2.0, 3.0);

    let mut tex = MaterialParameter::new("tex");
    let sampler = tex.set_texture("res/brick.png", true);
    let mut time = MaterialParameter::new("time");
    time.set_method(method(|| 2.0f32));
    let mut pos = MaterialParameter::new("pos");
    pos.bind_value(node.clone(), "getTranslationWorld").unwrap();
    let mut scale = MaterialParameter::new("scale");
    scale.bind_value(node, "&Node::getScaleY").unwrap();

    for param in &mut [tex, time, pos, scale] {
        bind(param, &mut effect).unwrap();
    }

    match effect.last_value("tex") {
        Some(Recorded::Sampler(uploaded)) => assert!(Rc::ptr_eq(&sampler, uploaded)),
        other => panic!("unexpected upload {:?}", other),
    }
    assert_eq!(Some(&Recorded::Float(2.0)), effect.last_value("time"));
    assert_eq!(
        Some(&Recorded::Vector {
            arity: 3,
            data: vec![1.0, 2.0, 3.0]
        }),
        effect.last_value("pos")
    );
    assert_eq!(Some(&Recorded::Float(1.0)), effect.last_value("scale"));
}

#[test]
fn empty_parameter_is_an_error() {
    let mut effect = RecordingEffect::new("plain", &["u_color"]);
    let mut param = MaterialParameter::new("u_color");

    let (result, records) = capture_logs(|| bind(&mut param, &mut effect));
    let err = result.unwrap_err();

    assert_eq!(
        Some(&MaterialError::UnsupportedKind {
            uniform: "u_color".into(),
            kind: ValueKind::None,
        }),
        err.downcast_ref::<MaterialError>()
    );
    assert!(effect.uploads().is_empty());
    assert!(records.iter().any(|r| r.level == Level::Error));
}

#[test]
fn node_table_rejects_unknown_accessor() {
    let node = Node::new("lamp").into_ref();
    let mut param = MaterialParameter::new("u_lightPosition");

    param.bind_value(node.clone(), "getTranslationWorld").unwrap();
    assert_eq!(ValueKind::ComputedBinding, param.kind());

    assert_eq!(
        Err(MaterialError::UnknownNodeAccessor("bogusAccessor".into())),
        param.bind_value(node, "bogusAccessor")
    );
}

#[test]
fn caller_writes_keep_shared_array_in_bounds() {
    let data = array(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let mut param = MaterialParameter::new("u_points");
    param.set_vector3_array(data.clone(), 2);

    {
        let mut floats = data.borrow_mut();
        assert_eq!(6, floats.len());
        floats[3..].copy_from_slice(&[7.0, 8.0, 9.0]);
    }
    assert_eq!(6, data.len());

    let mut effect = RecordingEffect::new("points", &["u_points"]);
    bind(&mut param, &mut effect).unwrap();
    assert_eq!(
        Some(&Recorded::Vector {
            arity: 3,
            data: vec![1.0, 2.0, 3.0, 7.0, 8.0, 9.0]
        }),
        effect.last_value("u_points")
    );

    let mut value = AnimationValue::new(param.component_count(Uniform));
    param.current_value(Uniform, &mut value);
    assert_eq!(&[1.0, 2.0, 3.0, 7.0, 8.0, 9.0], value.as_slice());
}
