use proptest::prelude::*;
use ufo_model::{
    CouplingInfo, ErrorKind, LorentzInfo, ParticleId, ParticleInfo, SymbolTable, SymbolTables,
};

#[test]
fn declare_upgrades_placeholder_in_place() {
    let mut table: SymbolTable<ParticleInfo> = SymbolTable::new();
    let placeholder = table.intern("t");
    let declared = table.declare(ParticleInfo::new("t").with_pdg_code(6).with_antiname("t~"));
    assert_eq!(placeholder, declared);
    assert_eq!(table.resolve(declared).unwrap().pdg_code, Some(6));
    assert_eq!(table.len(), 1);
}

#[test]
fn redeclaring_keeps_first_declaration() {
    let mut table: SymbolTable<CouplingInfo> = SymbolTable::new();
    let first = table.declare(CouplingInfo::new("GC_11").with_value("complex(0,1)*G"));
    let second = table.declare(CouplingInfo::new("GC_11").with_value("0"));
    assert_eq!(first, second);
    assert_eq!(table.resolve(first).unwrap().value.as_deref(), Some("complex(0,1)*G"));
}

#[test]
fn unknown_names_and_handles_are_errors() {
    let table: SymbolTable<LorentzInfo> = SymbolTable::new();
    assert_eq!(table.lookup("FFV1"), None);
    let err = table.require("FFV1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSymbol);
    assert_eq!(err.info().context["table"], "lorentz");

    let particles: SymbolTable<ParticleInfo> = SymbolTable::new();
    let err = particles.name_of(ParticleId::from_raw(7)).unwrap_err();
    assert_eq!(err.info().code, "unknown-handle");
}

#[test]
fn declare_all_fills_every_table() {
    let mut symbols = SymbolTables::new();
    symbols.declare_all(
        [ParticleInfo::new("g").with_spin(3).with_color(8)],
        [LorentzInfo::new("VVV1", vec![3, 3, 3]).with_structure("P(3,1)*Metric(1,2)")],
        [CouplingInfo::new("GC_10").with_order("QCD", 1)],
    );
    assert_eq!(symbols.particles.len(), 1);
    assert_eq!(
        symbols
            .lorentz
            .resolve(symbols.lorentz.lookup("VVV1").unwrap())
            .unwrap()
            .arity(),
        Some(3)
    );
    assert!(symbols.couplings.contains("GC_10"));
}

proptest! {
    #[test]
    fn interning_is_idempotent(names in prop::collection::vec("[a-z][a-z0-9~+-]{0,4}", 1..24)) {
        let mut table: SymbolTable<ParticleInfo> = SymbolTable::new();
        let first: Vec<_> = names.iter().map(|name| table.intern(name)).collect();
        let size = table.len();
        let second: Vec<_> = names.iter().map(|name| table.intern(name)).collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(table.len(), size);
        for (name, id) in names.iter().zip(&first) {
            prop_assert_eq!(table.name_of(*id).unwrap(), name.as_str());
            prop_assert_eq!(table.lookup(name), Some(*id));
        }
    }
}
