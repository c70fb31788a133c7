use proptest::prelude::*;
use ufo_color::{parse, parse_expr, ColorExpr, ColorIndex, ColorTerm};

fn index() -> impl Strategy<Value = ColorIndex> {
    prop_oneof![1i32..=6, -6i32..=-1].prop_map(|raw| ColorIndex::new(raw).unwrap())
}

fn triple() -> impl Strategy<Value = [ColorIndex; 3]> {
    (index(), index(), index()).prop_map(|(a, b, c)| [a, b, c])
}

fn term() -> impl Strategy<Value = ColorTerm> {
    prop_oneof![
        Just(ColorTerm::Unit),
        (index(), index()).prop_map(|(i, j)| ColorTerm::Identity([i, j])),
        prop::collection::vec(index(), 3..6).prop_map(ColorTerm::Generator),
        triple().prop_map(ColorTerm::StructureF),
        triple().prop_map(ColorTerm::StructureD),
        triple().prop_map(ColorTerm::Epsilon),
        triple().prop_map(ColorTerm::EpsilonBar),
    ]
}

fn expr() -> impl Strategy<Value = ColorExpr> {
    prop::collection::vec(term(), 1..4).prop_map(|terms| ColorExpr::from_terms(terms).unwrap())
}

proptest! {
    #[test]
    fn canonical_printer_round_trips(original in expr()) {
        let rendered = original.to_string();
        let reparsed = parse_expr(&rendered).unwrap();
        prop_assert_eq!(&reparsed, &original);
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn leg_check_matches_max_leg(original in expr(), legs in 3usize..7) {
        let rendered = original.to_string();
        let within = original.max_leg().map_or(true, |leg| leg <= legs);
        prop_assert_eq!(parse(&rendered, legs).is_ok(), within);
    }
}

#[test]
fn source_table_samples_round_trip() {
    let samples = [
        "1",
        "Identity(1,2)",
        "Identity(2,3)",
        "T(3,2,1)",
        "T(-1,2,1)*T(3,4,-1)",
        "f(1,2,3)",
        "f(-1,1,2)*f(3,4,-1)",
        "f(-1,1,3)*f(2,4,-1)",
        "f(-1,1,4)*f(2,3,-1)",
        "Identity(1,2)*Identity(3,4)",
        "T(-1,2,1)*T(-1,4,3)",
    ];
    for raw in samples {
        let expr = parse(raw, 4).unwrap();
        assert_eq!(expr.to_string(), raw);
        assert_eq!(parse(&expr.to_string(), 4).unwrap(), expr);
    }
}
