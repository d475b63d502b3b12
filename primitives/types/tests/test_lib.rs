use types::{GoType, Primitive};

#[test]
fn every_primitive_round_trips_through_its_descriptor() {
    for primitive in Primitive::ALL {
        let ty = GoType::parse(primitive.as_go()).expect("primitive descriptor");
        assert_eq!(ty, GoType::Primitive(primitive));
        assert_eq!(ty.to_string(), primitive.as_go());
    }
}

#[test]
fn only_the_string_slice_primitive_is_a_list() {
    let lists: Vec<Primitive> = Primitive::ALL.into_iter().filter(Primitive::is_list).collect();
    assert_eq!(lists, vec![Primitive::StringSlice]);
}

#[test]
fn struct_list_element_reports_pointer_lists() {
    let ty = GoType::parse("[]*Fill").expect("list descriptor");
    assert_eq!(ty.struct_list_element(), Some(("Fill", true)));

    let ty = GoType::parse("[]Fill").expect("list descriptor");
    assert_eq!(ty.struct_list_element(), Some(("Fill", false)));

    let ty = GoType::parse("[]int").expect("list descriptor");
    assert_eq!(ty.struct_list_element(), None);
}
