use crate::{
    error::{ErrorClass, ErrorOrigin},
    hash::MurmurState,
    model::DataType,
    object::{ObjectRef, SgObject},
    registry::Parameters,
    serialize::{StreamReader, StreamWriter, Token, cbor},
    test_support::{GaussianKernel, Machine, factory},
    types::{SgMatrix, SgVector},
    value::FieldValue,
};
use sgparam_primitives::{ContainerType, PrimitiveType, StructureType};
use std::{cell::RefCell, rc::Rc};

fn kernel_params(width: f64, cache: i32) -> Parameters {
    let mut params = Parameters::new();
    params.add("width", width, "").expect("width");
    params.add("cache_size", cache, "").expect("cache_size");

    params
}

// ---- registration ------------------------------------------------------

#[test]
fn names_are_unique_within_a_registry() {
    let mut params = Parameters::new();
    params.add("width", 1.0f64, "").expect("first");

    let err = params.add("width", 2i32, "").expect_err("duplicate");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.origin, ErrorOrigin::Registry);
    assert!(err.message.contains("double parameter `width`"));
    assert_eq!(params.num_parameters(), 1);
}

#[test]
fn same_name_in_two_registries_is_fine() {
    let a = kernel_params(1.0, 1);
    let b = kernel_params(2.0, 2);

    assert!(a.contains_parameter("width"));
    assert!(b.contains_parameter("width"));
}

#[test]
fn illegal_names_are_rejected() {
    let mut params = Parameters::new();

    for name in ["", "with space", "slash/ed", "dash-ed", "ümlaut"] {
        let err = params.add(name, 1u8, "").expect_err(name);
        assert_eq!(err.class, ErrorClass::InvariantViolation, "{name:?}");
    }
    for name in ["a", "snake_case", "dotted.name", "x9"] {
        params.add(name, 1u8, "").expect(name);
    }

    assert_eq!(params.num_parameters(), 4);
}

#[test]
fn add_matrix_checks_shape() {
    let mut params = Parameters::new();

    let err = params
        .add_matrix("m", 2, 2, vec![1.0f64, 2.0, 3.0], "")
        .expect_err("shape");
    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert!(!params.contains_parameter("m"));

    let handle = params
        .add_matrix("m", 1, 3, vec![1.0f64, 2.0, 3.0], "")
        .expect("shape fits");
    assert_eq!(handle.lengths(), (1, 3));
    assert_eq!(
        handle.get().and_then(|m| m.get(0, 2).copied()),
        Some(3.0)
    );
}

#[test]
fn add_type_checks_slot_type() {
    let mut params = Parameters::new();
    let int_type = DataType::scalar(PrimitiveType::Int32);
    let slot = Rc::new(RefCell::new(FieldValue::empty(DataType::scalar(
        PrimitiveType::Float32,
    ))));

    let err = params
        .add_type(int_type, slot, "n", "")
        .expect_err("slot holds float32");
    assert_eq!(err.class, ErrorClass::InvariantViolation);

    let slot = Rc::new(RefCell::new(FieldValue::empty(int_type)));
    params.add_type(int_type, slot, "n", "").expect("matching");
    assert_eq!(
        params.get_parameter_by_name("n").map(|p| p.datatype()),
        Some(int_type)
    );
}

#[test]
fn handles_report_registered_types() {
    let mut params = Parameters::new();
    params.add_vector("v", vec![1u16], "").expect("v");
    params
        .add("sv", SgVector(vec![1u16]), "")
        .expect("sv");
    params
        .add("sm", SgMatrix::<u16>::default(), "")
        .expect("sm");

    let containers: Vec<_> = params.iter().map(|p| p.datatype().container()).collect();

    assert_eq!(
        containers,
        vec![
            ContainerType::Vector,
            ContainerType::SgVector,
            ContainerType::SgMatrix
        ]
    );
    assert!(
        params
            .iter()
            .all(|p| p.datatype().structure() == StructureType::None)
    );
}

// ---- lookup ------------------------------------------------------------

#[test]
fn lookup_by_index_and_name() {
    let params = kernel_params(1.0, 10);

    assert_eq!(params.get_parameter(1).map(|p| p.name()), Some("cache_size"));
    assert!(params.get_parameter(2).is_none());
    assert_eq!(
        params
            .get_parameter_by_name("width")
            .map(|p| p.datatype().primitive()),
        Some(PrimitiveType::Float64)
    );
    assert!(params.get_parameter_by_name("missing").is_none());
    assert_eq!((&params).into_iter().count(), 2);
    assert!(Parameters::new().is_empty());
}

// ---- bulk operations ---------------------------------------------------

#[test]
fn set_from_parameters_copies_every_field() {
    let target = kernel_params(1.0, 10);
    let source = kernel_params(4.0, 20);

    target.set_from_parameters(&source).expect("copy");

    assert!(target.equals(&source, 0.0).expect("equals"));
}

#[test]
fn set_from_parameters_needs_every_source_field() {
    let target = kernel_params(1.0, 10);
    let mut source = kernel_params(4.0, 20);
    source.add("extra", 1i8, "").expect("extra");

    let err = target.set_from_parameters(&source).expect_err("missing");

    assert_eq!(err.class, ErrorClass::NotFound);
    assert!(err.message.contains("extra"));
    assert!(target.equals(&kernel_params(1.0, 10), 0.0).expect("equals"));
}

#[test]
fn set_from_parameters_leaves_target_untouched_on_type_mismatch() {
    let target = kernel_params(1.0, 10);
    let mut source = Parameters::new();
    source.add("width", 4.0f64, "").expect("width");
    source.add("cache_size", 20i64, "").expect("cache_size");

    let err = target.set_from_parameters(&source).expect_err("mismatch");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert!(err.message.contains("cache_size"));
    assert!(target.equals(&kernel_params(1.0, 10), 0.0).expect("equals"));
}

#[test]
fn set_from_parameters_retains_shared_objects() {
    let kernel: ObjectRef = Rc::new(GaussianKernel::new(1.0));
    let source = Machine::with_kernel(Rc::clone(&kernel));
    let target = Machine::new();

    target
        .parameters()
        .set_from_parameters(source.parameters())
        .expect("copy");

    assert_eq!(Rc::strong_count(&kernel), 3);
    assert!(
        target
            .kernel
            .get()
            .flatten()
            .is_some_and(|k| Rc::ptr_eq(&k, &kernel))
    );

    drop(target);
    assert_eq!(Rc::strong_count(&kernel), 2);
}

#[test]
fn add_parameters_shares_storage() {
    let inner = kernel_params(1.0, 10);
    let mut outer = Parameters::new();
    let bias = outer.add("bias", 0.5f32, "").expect("bias");

    outer.add_parameters(&inner).expect("merge");
    assert_eq!(outer.num_parameters(), 3);

    let source = kernel_params(9.0, 90);
    inner.set_from_parameters(&source).expect("copy");

    let width = outer.get_parameter_by_name("width").expect("shared");
    assert!(width.equals(source.get_parameter(0).expect("width"), 0.0).expect("equals"));
    assert_eq!(bias.get(), Some(0.5));
}

#[test]
fn add_parameters_rejects_clashing_names() {
    let mut outer = kernel_params(1.0, 10);

    let err = outer
        .add_parameters(&kernel_params(2.0, 20))
        .expect_err("clash");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
}

#[test]
fn registry_hash_covers_all_fields_in_order() {
    let a = kernel_params(1.0, 10);
    let b = kernel_params(1.0, 10);
    let c = kernel_params(1.0, 11);

    assert_eq!(a.hash().expect("hash"), b.hash().expect("hash"));
    assert_ne!(a.hash().expect("hash"), c.hash().expect("hash"));

    let mut state = MurmurState::default();
    a.incremental_hash(&mut state).expect("hash");
    assert_eq!(state.total_length, 12);
    assert_eq!(state.finish(), a.hash().expect("hash"));
}

#[test]
fn registry_hash_fails_on_unhashable_field() {
    let machine = Machine::populated();

    let err = machine.parameters().hash().expect_err("object field");

    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn equals_checks_length_and_order() {
    let a = kernel_params(1.0, 10);
    let mut longer = kernel_params(1.0, 10);
    longer.add("extra", 0u8, "").expect("extra");

    let mut reordered = Parameters::new();
    reordered.add("cache_size", 10i32, "").expect("cache_size");
    reordered.add("width", 1.0f64, "").expect("width");

    assert!(!a.equals(&longer, 0.0).expect("equals"));
    assert!(!a.equals(&reordered, 0.0).expect("equals"));
}

#[test]
fn save_and_load_through_cbor_bytes() {
    let source = Machine::populated();
    let mut writer = StreamWriter::new();
    source.parameters().save(&mut writer, "machine/").expect("save");

    let bytes = cbor::serialize(&writer.into_tokens()).expect("encode");
    let tokens: Vec<Token> = cbor::deserialize(&bytes).expect("decode");

    let target = Machine::new();
    let mut reader = StreamReader::new(tokens);
    target
        .parameters()
        .load(&mut reader, &factory(), "machine/")
        .expect("load");

    assert!(reader.is_finished());
    assert!(
        source
            .parameters()
            .equals(target.parameters(), 0.0)
            .expect("equals")
    );
}

#[test]
fn load_with_wrong_prefix_is_corruption() {
    let source = kernel_params(1.0, 10);
    let mut writer = StreamWriter::new();
    source.save(&mut writer, "a/").expect("save");

    let err = kernel_params(0.0, 0)
        .load(&mut StreamReader::new(writer.into_tokens()), &factory(), "b/")
        .expect_err("paths differ");

    assert_eq!(err.class, ErrorClass::Corruption);
}
