mod common;

use std::sync::Arc;
use std::thread;

use ufo_model::{ErrorKind, ModelQuery, RawVertex, Registry, RegistryConfig};

fn sample_query() -> ModelQuery {
    let (registry, report) = common::sample_registry(RegistryConfig::strict());
    assert!(report.is_clean(), "{:?}", report.failed);
    ModelQuery::from(registry)
}

#[test]
fn views_resolve_names() {
    let query = sample_query();
    let view = query.get("V_5").unwrap();
    assert_eq!(view.particle_names().unwrap(), vec!["b~", "b", "h02"]);
    assert_eq!(view.lorentz_names().unwrap(), vec!["FFS1", "FFS3"]);
    assert_eq!(
        view.coupling_entries().unwrap(),
        vec![(0, 0, "GC_1900"), (1, 0, "GC_1901")]
    );
    assert_eq!(view.color_structures()[0].to_string(), "Identity(1,2)");
}

#[test]
fn four_gluon_entries_are_key_ordered() {
    let query = sample_query();
    let entries = query.get("V_4").unwrap().coupling_entries().unwrap();
    assert_eq!(
        entries,
        vec![(0, 0, "GC_12"), (1, 1, "GC_12"), (2, 2, "GC_12")]
    );
}

#[test]
fn find_by_names_is_order_independent() {
    let query = sample_query();
    let forward: Vec<_> = query
        .find_by_names(&["t~", "t", "g"])
        .unwrap()
        .iter()
        .map(|view| view.name())
        .collect();
    let reversed: Vec<_> = query
        .find_by_names(&["g", "t", "t~"])
        .unwrap()
        .iter()
        .map(|view| view.name())
        .collect();
    assert_eq!(forward, vec!["V_6"]);
    assert_eq!(forward, reversed);

    assert!(query.find_by_names(&["g", "g", "h01"]).unwrap().is_empty());
    let err = query.find_by_names(&["g", "g", "gluino"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSymbol);
}

#[test]
fn containing_and_coupling_filters() {
    let query = sample_query();
    let with_gluon: Vec<_> = query
        .containing("g")
        .unwrap()
        .iter()
        .map(|view| view.name())
        .collect();
    assert_eq!(with_gluon, vec!["V_3", "V_4", "V_6", "V_7"]);

    let with_gc11: Vec<_> = query
        .with_coupling("GC_11")
        .unwrap()
        .iter()
        .map(|view| view.name())
        .collect();
    assert_eq!(with_gc11, vec!["V_6", "V_7"]);
    assert!(query.with_coupling("GC_404").is_err());
}

#[test]
fn missing_vertex_is_not_found() {
    let query = sample_query();
    let err = query.get("V_999").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VertexNotFound);
}

#[test]
fn all_lists_in_load_order() {
    let query = sample_query();
    let names: Vec<_> = query.all().map(|view| view.name()).collect();
    assert_eq!(
        names,
        vec!["V_1", "V_2", "V_3", "V_4", "V_5", "V_6", "V_7", "V_8", "V_9"]
    );
}

#[test]
fn view_exports_raw_record() {
    let query = sample_query();
    let raw = query.get("V_9").unwrap().to_raw().unwrap();
    assert_eq!(
        raw,
        RawVertex::new("V_9", &["W-", "W+", "h01"], &["1"], &["VVS1"], &[(0, 0, "GC_70")])
    );
}

#[test]
fn concurrent_readers_agree() {
    let mut registry = Registry::default();
    registry.load([RawVertex::new(
        "V_6",
        &["t~", "t", "g"],
        &["T(3,2,1)"],
        &["FFV1"],
        &[(0, 0, "GC_11")],
    )]);
    let shared = Arc::new(registry);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let query = ModelQuery::new(Arc::clone(&shared));
            thread::spawn(move || {
                let views = query.find_by_names(&["g", "t", "t~"]).unwrap();
                views.iter().map(|view| view.name().to_string()).collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["V_6".to_string()]);
    }
}
