// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::cat;
use finsight::analytics::category_tree::{
    build_category_tree, category_tree_flat, cyclic_category_ids, flatten_category_tree,
};
use finsight::error::ReportError;
use finsight::models::CategoryNode;

#[test]
fn builds_nested_forest_in_input_order() {
    let cats = vec![
        cat("h", "Moradia", None),
        cat("a", "Alimentação", None),
        cat("r", "Aluguel", Some("h")),
        cat("m", "Mercado", Some("a")),
        cat("e", "Energia", Some("h")),
    ];
    let forest = build_category_tree(&cats).unwrap();
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].category.id, "h");
    assert_eq!(forest[1].category.id, "a");
    let kids: Vec<&str> = forest[0]
        .children
        .iter()
        .map(|n| n.category.id.as_str())
        .collect();
    assert_eq!(kids, ["r", "e"]);
}

#[test]
fn flatten_reports_depth_and_qualified_name() {
    let cats = vec![
        cat("t", "Transporte", None),
        cat("c", "Carro", Some("t")),
        cat("f", "Combustível", Some("c")),
        cat("b", "Ônibus", Some("t")),
    ];
    let flat = category_tree_flat(&cats).unwrap();
    let got: Vec<(&str, usize)> = flat
        .iter()
        .map(|f| (f.qualified_name.as_str(), f.depth))
        .collect();
    assert_eq!(
        got,
        [
            ("Transporte", 0),
            ("Transporte > Carro", 1),
            ("Transporte > Carro > Combustível", 2),
            ("Transporte > Ônibus", 1),
        ]
    );
}

#[test]
fn every_category_appears_exactly_once() {
    let cats = vec![
        cat("1", "A", None),
        cat("2", "B", Some("1")),
        cat("3", "C", Some("2")),
        cat("4", "D", Some("missing")),
        cat("5", "E", Some("1")),
        cat("6", "F", None),
    ];
    let flat = category_tree_flat(&cats).unwrap();
    assert_eq!(flat.len(), cats.len());
    for c in &cats {
        assert_eq!(flat.iter().filter(|f| f.category.id == c.id).count(), 1);
    }
}

#[test]
fn orphan_is_promoted_to_root() {
    let cats = vec![cat("a", "Orphan", Some("missing"))];
    let forest = build_category_tree(&cats).unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].category.id, "a");
    assert!(forest[0].children.is_empty());
}

#[test]
fn two_node_cycle_is_detected() {
    let cats = vec![cat("a", "A", Some("b")), cat("b", "B", Some("a"))];
    let err = build_category_tree(&cats).unwrap_err();
    assert!(matches!(err, ReportError::CycleDetected { .. }));
    assert!(category_tree_flat(&cats).is_err());
    assert_eq!(cyclic_category_ids(&cats), ["a", "b"]);
}

#[test]
fn self_parent_is_a_cycle() {
    let cats = vec![cat("root", "Root", None), cat("x", "X", Some("x"))];
    assert_eq!(
        build_category_tree(&cats).unwrap_err(),
        ReportError::CycleDetected { id: "x".into() }
    );
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let cats = vec![cat("a", "First", None), cat("a", "Second", None)];
    let flat = category_tree_flat(&cats).unwrap();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].qualified_name, "First");
}

#[test]
fn flatten_rejects_repeated_node() {
    let leaf = CategoryNode {
        category: cat("x", "X", None),
        children: Vec::new(),
    };
    let forest = vec![leaf.clone(), leaf];
    assert!(matches!(
        flatten_category_tree(&forest),
        Err(ReportError::CycleDetected { .. })
    ));
}

#[test]
fn empty_input_gives_empty_forest() {
    assert!(build_category_tree(&[]).unwrap().is_empty());
    assert!(flatten_category_tree(&[]).unwrap().is_empty());
}
