mod common;

use olmorph::{Analysis, Analyzer, AnalyzerConfig, AnalyzerError, HfstTransducer};

use common::{ab_to_upper, flag_gated, init_logging, outputs, TransducerBuilder};

#[test]
fn maps_ab_to_upper() {
    init_logging();
    let t = ab_to_upper(false, 0.0, 0.0).load();

    assert!(!t.is_weighted());
    assert_eq!(t.analyze("ab").unwrap(), vec![Analysis::new("AB".into(), 0.0)]);
}

#[test]
fn empty_word_has_no_analyses() {
    let t = ab_to_upper(false, 0.0, 0.0).load();
    assert!(t.analyze("").unwrap().is_empty());
}

#[test]
fn unknown_symbols_have_no_analyses() {
    let t = ab_to_upper(false, 0.0, 0.0).load();

    assert!(t.analyze("xyz").unwrap().is_empty());
    assert!(t.analyze("abx").unwrap().is_empty());
}

#[test]
fn partial_and_rejected_paths() {
    let t = ab_to_upper(false, 0.0, 0.0).load();

    // "a" stops in a non-final state, "abb" runs out of arcs
    assert!(t.analyze("a").unwrap().is_empty());
    assert!(t.analyze("abb").unwrap().is_empty());
    assert!(t.analyze("ba").unwrap().is_empty());
    // output symbols tokenize, but have no arcs of their own
    assert!(t.analyze("AB").unwrap().is_empty());
}

#[test]
fn weights_are_summed() {
    let t = ab_to_upper(true, 0.5, 1.25).load();
    assert!(t.is_weighted());

    let analyses = t.analyze("ab").unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0].output(), "AB");
    assert!((analyses[0].weight() - 1.75).abs() < 1e-6);
}

#[test]
fn final_weight_is_added() {
    let t = TransducerBuilder::new(&["", "a", "b", "A", "B"])
        .weighted()
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .arc(1, 3, 1, 0.5)
        .final_state(0.25)
        .load();

    let analyses = t.analyze("a").unwrap();
    assert_eq!(outputs(&analyses), vec!["A"]);
    assert!((analyses[0].weight() - 0.75).abs() < 1e-6);
}

#[test]
fn final_state_in_index_table() {
    // state 0 at slots 0..=2, state 3 at slot 3 (final)
    let builder = TransducerBuilder::new(&["", "a"])
        .weighted()
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .index_final(2.0)
        .arc_raw(1, 1, 3, 0.5);
    let t = builder.load();

    let analyses = t.analyze("a").unwrap();
    assert_eq!(outputs(&analyses), vec!["a"]);
    assert!((analyses[0].weight() - 2.5).abs() < 1e-6);

    let unweighted = TransducerBuilder::new(&["", "a"])
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .index_final(0.0)
        .arc_raw(1, 1, 3, 0.0)
        .load();
    assert_eq!(
        unweighted.analyze("a").unwrap(),
        vec![Analysis::new("a".into(), 0.0)]
    );
}

#[test]
fn flag_diacritics_gate_paths() {
    let t = flag_gated("@P.X.1@", "@R.X.1@").load();
    assert_eq!(t.analyze("a").unwrap(), vec![Analysis::new("a".into(), 0.0)]);

    let t = flag_gated("@P.X.1@", "@R.X.2@").load();
    assert!(t.analyze("a").unwrap().is_empty());

    let t = flag_gated("@P.X.1@", "@D.X@").load();
    assert!(t.analyze("a").unwrap().is_empty());

    let t = flag_gated("@N.X.1@", "@U.X.2@").load();
    assert_eq!(outputs(&t.analyze("a").unwrap()), vec!["a"]);
}

#[test]
fn flag_state_does_not_leak_between_branches() {
    // Two epsilon branches from the start state: one sets X=1, the other
    // requires X=1 without having set it.
    let t = TransducerBuilder::new(&["", "a", "@P.X.1@", "@R.X.1@"])
        .index_empty()
        .index_arcs(0, 0)
        .arc(2, 2, 2, 0.0)
        .arc(3, 3, 2, 0.0)
        .state()
        .arc(1, 1, 4, 0.0)
        .final_state(0.0)
        .load();

    assert_eq!(outputs(&t.analyze("a").unwrap()), vec!["a"]);
}

#[test]
fn epsilon_arcs_emit_output() {
    let t = TransducerBuilder::new(&["", "a", "+N"])
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .arc(1, 1, 1, 0.0)
        .state()
        .arc(0, 2, 3, 0.0)
        .final_state(0.0)
        .load();

    assert_eq!(outputs(&t.analyze("a").unwrap()), vec!["a+N"]);
}

#[test]
fn all_paths_in_order() {
    let t = TransducerBuilder::new(&["", "a", "x", "y"])
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .arc(1, 2, 2, 0.0)
        .arc(1, 3, 2, 0.0)
        .final_state(0.0)
        .load();

    let first = t.analyze("a").unwrap();
    assert_eq!(outputs(&first), vec!["x", "y"]);

    for _ in 0..10 {
        assert_eq!(t.analyze("a").unwrap(), first);
    }
}

#[test]
fn duplicates_are_kept_unless_asked() {
    let t = TransducerBuilder::new(&["", "a", "x"])
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .arc(1, 2, 2, 0.0)
        .arc(1, 2, 2, 0.0)
        .final_state(0.0)
        .load();

    assert_eq!(outputs(&t.analyze("a").unwrap()), vec!["x", "x"]);

    let config = AnalyzerConfig {
        deduplicate: true,
        ..AnalyzerConfig::default()
    };
    assert_eq!(
        outputs(&t.analyze_with_config("a", &config).unwrap()),
        vec!["x"]
    );
}

#[test]
fn digraph_symbols_use_longest_match() {
    let t = TransducerBuilder::new(&["", "а", "аь"])
        .index_empty()
        .index_empty()
        .index_empty()
        .index_arcs(2, 0)
        .arc(2, 2, 1, 0.0)
        .final_state(0.0)
        .load();

    assert_eq!(t.tokenize("аь"), Some(vec![2]));
    assert_eq!(outputs(&t.analyze("аь").unwrap()), vec!["аь"]);
    assert!(t.analyze("а").unwrap().is_empty());
}

fn epsilon_cycle() -> TransducerBuilder {
    TransducerBuilder::new(&["", "a"])
        .index_empty()
        .index_arcs(0, 1)
        .state()
        .arc(0, 0, 0, 0.0)
}

#[test]
fn epsilon_cycles_hit_the_depth_limit() {
    let t = epsilon_cycle().load();

    let config = AnalyzerConfig {
        max_depth: 64,
        ..AnalyzerConfig::default()
    };
    assert_eq!(
        t.analyze_with_config("a", &config),
        Err(AnalyzerError::TraversalLimitExceeded { depth: 64 })
    );
    assert!(matches!(
        t.analyze("a"),
        Err(AnalyzerError::TraversalLimitExceeded { .. })
    ));
}

#[test]
fn index_targets_below_transition_table_are_ignored() {
    let mut bytes = TransducerBuilder::new(&["", "a"])
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .arc(1, 1, 1, 0.0)
        .final_state(0.0)
        .build();

    let t = HfstTransducer::from_bytes(&bytes).unwrap();
    assert_eq!(outputs(&t.analyze("a").unwrap()), vec!["a"]);

    // point index slot 2 back into the index table
    let slot = bytes.len() - 2 * 8 - 6 + 2;
    bytes[slot..slot + 4].copy_from_slice(&5u32.to_le_bytes());

    let t = HfstTransducer::from_bytes(&bytes).unwrap();
    assert!(t.analyze("a").unwrap().is_empty());
}

#[test]
fn shared_between_threads() {
    let t = ab_to_upper(true, 0.5, 1.25).load();
    let expected = t.analyze("ab").unwrap();

    std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| {
                s.spawn(|| {
                    (0..100)
                        .map(|_| t.analyze("ab").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            for result in handle.join().unwrap() {
                assert_eq!(result, expected);
            }
        }
    });
}
