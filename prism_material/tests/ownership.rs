use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
    rc::Rc,
};

use prism_core::{
    nalgebra::{Matrix4, Vector2, Vector3, Vector4},
    Node,
};
use prism_material::{
    array, method, node_binding, ArrayRef, NodeBinding, TextureSampler, ValueCell, ValueKind,
};

struct CountingAllocator;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            track(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        track(-1);
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn assert_cleared(cell: &mut ValueCell, before: isize) {
    cell.clear();
    assert_eq!(ValueKind::None, cell.kind());
    assert_eq!(1, cell.count());
    assert!(!cell.owns_storage());
    assert_eq!(before, live(), "value left live allocations behind");
}

#[test]
fn owned_values_are_released_on_clear() {
    let mut cell = ValueCell::new();
    let before = live();

    cell.set_vector2(&Vector2::new(1.0, 2.0));
    assert_eq!(before + 1, live());
    assert_cleared(&mut cell, before);

    cell.set_vector3(&Vector3::new(1.0, 2.0, 3.0));
    assert_cleared(&mut cell, before);

    cell.set_vector4(&Vector4::new(1.0, 2.0, 3.0, 4.0));
    assert_cleared(&mut cell, before);

    cell.set_matrix(&Matrix4::identity());
    assert_eq!(before + 1, live());
    assert_cleared(&mut cell, before);
}

#[test]
fn replacing_a_value_releases_the_previous_one() {
    let mut cell = ValueCell::new();
    let before = live();

    cell.set_vector3(&Vector3::new(1.0, 2.0, 3.0));
    cell.set_vector4(&Vector4::new(1.0, 2.0, 3.0, 4.0));
    cell.set_float(3.0);
    assert_eq!(before, live());
    assert_cleared(&mut cell, before);
}

#[test]
fn single_matrix_is_reused() {
    let mut cell = ValueCell::new();
    cell.set_matrix(&Matrix4::identity());
    let before = live();

    cell.set_matrix(&Matrix4::new_scaling(3.0));
    assert_eq!(before, live());
}

#[test]
fn arrays_are_never_copied() {
    let floats = array(vec![1.0; 32]);
    let ints = array(vec![1; 4]);
    let mut cell = ValueCell::new();
    let before = live();

    cell.set_float_array(floats.clone(), 4);
    assert_eq!(before, live());
    assert_cleared(&mut cell, before);

    cell.set_int_array(ints.clone(), 4);
    assert_cleared(&mut cell, before);

    cell.set_vector2_array(floats.clone(), 16);
    assert_cleared(&mut cell, before);

    cell.set_vector4_array(floats.clone(), 8);
    assert_cleared(&mut cell, before);

    cell.set_matrix_array(floats.clone(), 2);
    assert_eq!(before, live());
    assert_cleared(&mut cell, before);

    assert_eq!(1, ArrayRef::strong_count(&floats));
    assert_eq!(1, ArrayRef::strong_count(&ints));
}

#[test]
fn shared_handles_are_released_once() {
    let sampler = TextureSampler::new("res/brick.png", false).into_ref();
    let time = method(|| 0.25f32);
    let mut cell = ValueCell::new();
    let before = live();

    cell.set_sampler(sampler.clone());
    assert_eq!(2, Rc::strong_count(&sampler));
    assert_cleared(&mut cell, before);
    assert_eq!(1, Rc::strong_count(&sampler));

    cell.set_method(time.clone());
    assert_eq!(2, Rc::strong_count(&time));
    assert_cleared(&mut cell, before);
    assert_eq!(1, Rc::strong_count(&time));
}

#[test]
fn node_bindings_are_released_on_clear() {
    node_binding::lookup("getScaleX").unwrap();
    let node = Node::new("lamp").into_ref();
    let mut cell = ValueCell::new();
    let before = live();

    cell.set_computed(NodeBinding::new(node.clone(), "getTranslationWorld").unwrap());
    assert_eq!(ValueKind::ComputedBinding, cell.kind());
    assert_eq!(2, Rc::strong_count(&node));
    assert_cleared(&mut cell, before);
    assert_eq!(1, Rc::strong_count(&node));
}
