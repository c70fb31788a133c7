use std::collections::BTreeSet;

use proptest::prelude::*;
use ufo_model::{ErrorKind, RawVertex, Registry};

const PARTICLES: [&str; 5] = ["a", "b", "c", "d", "e"];

fn arb_particles() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(PARTICLES.to_vec()), 3..6)
}

proptest! {
    #[test]
    fn coupling_keys_accept_iff_in_bounds(
        lorentz_len in 1usize..4,
        color_len in 1usize..4,
        keys in prop::collection::btree_set((-2i64..5, -2i64..5), 1..6),
    ) {
        let lorentz: Vec<String> = (0..lorentz_len).map(|i| format!("L{i}")).collect();
        let color: Vec<&str> = vec!["1"; color_len];
        let couplings: Vec<(i64, i64, &str)> = keys.iter().map(|(l, c)| (*l, *c, "G")).collect();
        let lorentz_refs: Vec<&str> = lorentz.iter().map(String::as_str).collect();
        let raw = RawVertex::new("V", &["a", "b", "c"], &color, &lorentz_refs, &couplings);

        let in_bounds = keys.iter().all(|(l, c)| {
            (0..lorentz_len as i64).contains(l) && (0..color_len as i64).contains(c)
        });
        let mut registry = Registry::default();
        let report = registry.load([raw]);
        if in_bounds {
            prop_assert!(report.is_clean());
            let vertex = registry.get("V").unwrap();
            for ((l, c), _) in vertex.couplings().iter() {
                prop_assert!(l < lorentz_len && c < color_len);
            }
            prop_assert_eq!(vertex.couplings().len(), keys.len());
        } else {
            prop_assert_eq!(report.failed[0].kind, ErrorKind::CouplingIndexOutOfRange);
            prop_assert!(registry.is_empty());
        }
    }

    #[test]
    fn color_legs_never_exceed_particle_count(legs in 3usize..6, index in 1i32..8) {
        let particles: Vec<&str> = PARTICLES[..legs].to_vec();
        let expr = format!("T({index},2,1)");
        let raw = RawVertex::new("V", &particles, &[expr.as_str()], &["L"], &[(0, 0, "G")]);
        let mut registry = Registry::default();
        let report = registry.load([raw]);
        if index as usize <= legs {
            prop_assert!(report.is_clean());
            let vertex = registry.get("V").unwrap();
            for leg in vertex.color_structures()[0].legs() {
                prop_assert!(leg >= 1 && leg <= vertex.legs());
            }
        } else {
            prop_assert_eq!(report.failed[0].kind, ErrorKind::ColorIndexOutOfRange);
        }
    }

    #[test]
    fn particle_lookup_matches_multiset_scan(
        tables in prop::collection::vec(arb_particles(), 1..12),
        probe in arb_particles(),
        shift in 0usize..6,
    ) {
        let mut registry = Registry::default();
        let records: Vec<RawVertex> = tables
            .iter()
            .enumerate()
            .map(|(i, particles)| {
                RawVertex::new(format!("V_{i}"), particles, &["1"], &["L"], &[(0, 0, "G")])
            })
            .collect();
        let report = registry.load(&records);
        prop_assert!(report.is_clean());

        let names = &registry.symbols().particles;
        let Some(ids) = probe.iter().map(|name| names.lookup(name)).collect::<Option<Vec<_>>>() else {
            return Ok(());
        };
        let mut rotated = ids.clone();
        rotated.rotate_left(shift % ids.len());

        let found: BTreeSet<&str> = registry.find_by_particles(&ids).iter().map(|v| v.name()).collect();
        let found_rotated: BTreeSet<&str> =
            registry.find_by_particles(&rotated).iter().map(|v| v.name()).collect();
        prop_assert_eq!(&found, &found_rotated);

        let mut wanted = probe.clone();
        wanted.sort_unstable();
        let expected: BTreeSet<&str> = records
            .iter()
            .filter(|raw| {
                let mut have: Vec<&str> = raw.particles.iter().map(String::as_str).collect();
                have.sort_unstable();
                have == wanted
            })
            .map(|raw| raw.name.as_str())
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn every_vertex_is_reachable_through_each_index(tables in prop::collection::vec(arb_particles(), 1..10)) {
        let mut registry = Registry::default();
        registry.load(tables.iter().enumerate().map(|(i, particles)| {
            RawVertex::new(format!("V_{i}"), particles, &["1"], &["L"], &[(0, 0, "G")])
        }));
        prop_assert_eq!(registry.all().count(), tables.len());
        for vertex in registry.all() {
            prop_assert_eq!(registry.get(vertex.name()).unwrap(), vertex);
            prop_assert!(registry
                .find_by_particles(vertex.particles())
                .iter()
                .any(|found| found.name() == vertex.name()));
            for particle in vertex.particles() {
                prop_assert!(registry
                    .containing(*particle)
                    .iter()
                    .any(|found| found.name() == vertex.name()));
            }
        }
    }
}
