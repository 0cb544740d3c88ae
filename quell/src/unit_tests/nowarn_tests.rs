// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario tests for the resolver: single paths, merging paths, cycles,
//! runtime graphs and the documented failure modes.

use super::fixtures::{
    codes, fw, graph, graph_for, id, package, parent, parent_with, project, project_targeting,
    project_with, resolve, wide_properties, NET5, NET6,
};
use crate::{
    Error, FlattenedNode, NoWarnResolver, NodeKind, ResolvedTargetGraph, SimpleFrameworkResolver,
    TransitiveNoWarnSet,
    WarningCode::{W1101, W1102, W1103, W1604, W1605, W1701},
};
use pretty_assertions::assert_eq;

#[test]
fn direct_suppression_from_parent_project_wide() {
    let graphs = [graph(vec![
        project("app", &["x"], &[]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[W1101]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1101])));
    assert!(result.suppresses(W1101, &id("x"), &fw(NET6)));
    assert!(!result.suppresses(W1102, &id("x"), &fw(NET6)));
}

#[test]
fn two_paths_intersect() {
    let graphs = [graph(vec![
        project("app", &["a", "b"], &[]),
        project("a", &["x"], &[W1101, W1102]),
        project("b", &["x"], &[W1102, W1103]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1102])));
}

#[test]
fn path_without_suppression_drops_package() {
    // x is reachable both directly (no suppression) and through a.
    let graphs = [graph(vec![
        project("app", &["a", "x"], &[]),
        project("a", &["x"], &[W1101]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), None);
    assert!(result.is_empty());
    assert_eq!(result.project_frameworks(), [fw(NET6)]);
}

#[test]
fn package_specific_suppression_applies_to_that_package_only() {
    let mut properties = wide_properties(&[]);
    properties.package_specific.add(W1604, "x", [fw(NET6)]);
    let graphs = [graph(vec![
        project("app", &["a"], &[]),
        project_with("a", &["x", "y"], properties),
        package("x", &[]),
        package("y", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1604])));
    assert_eq!(result.no_warn(&fw(NET6), &id("y")), None);
}

#[test]
fn cycle_terminates_and_matches_acyclic_result() {
    let graphs = [graph(vec![
        project("app", &["a"], &[]),
        project("a", &["b"], &[W1101]),
        project("b", &["a", "x"], &[W1102]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[]));

    assert_eq!(
        result.no_warn(&fw(NET6), &id("x")),
        Some(&codes(&[W1101, W1102]))
    );
}

#[test]
fn runtime_qualified_graph_contributes_nothing() {
    let plain = graph(vec![project("app", &["x"], &[]), package("x", &[])]);
    let runtime = ResolvedTargetGraph {
        framework: fw(NET6),
        runtime_identifier: Some("win-x64".to_string()),
        flattened: vec![project("app", &["y"], &[]), package("y", &[])],
    };
    let result = resolve(&[runtime, plain], &parent("app", &[W1101]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1101])));
    assert_eq!(result.no_warn(&fw(NET6), &id("y")), None);
    assert_eq!(result.project_frameworks(), [fw(NET6)]);
}

#[test]
fn empty_configuration_everywhere_yields_empty_result() {
    let graphs = [graph(vec![
        project("app", &["a"], &[]),
        project("a", &["x"], &[]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[]));

    assert!(result.is_empty());
}

#[test]
fn graph_with_only_the_parent_yields_empty_result() {
    let graphs = [graph(vec![project("app", &[], &[W1101])])];
    let result = resolve(&graphs, &parent("app", &[W1101]));

    assert!(result.is_empty());
    assert_eq!(result.project_frameworks(), [fw(NET6)]);
}

#[test]
fn dangling_edge_is_skipped() {
    let graphs = [graph(vec![
        project("app", &["x", "ghost"], &[]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[W1101]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1101])));
}

#[test]
fn unresolved_nearest_framework_contributes_no_suppression() {
    // a only declares net5.0, so under the net6.0 graph its configuration
    // never merges in; its edges are still walked.
    let graphs = [graph(vec![
        project("app", &["a"], &[]),
        project_targeting("a", &[NET5], &["x"], &[W1102]),
        package("x", &[]),
    ])];

    let reached = resolve(&graphs, &parent("app", &[W1101]));
    assert_eq!(reached.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1101])));

    let empty_parent = resolve(&graphs, &parent("app", &[]));
    assert!(empty_parent.is_empty());
}

#[test]
fn late_narrower_path_still_narrows_the_result() {
    // The wide path reaches x first; the narrower one arrives later through
    // an extra hop and must still be admitted.
    let graphs = [graph(vec![
        project("app", &["a", "c"], &[]),
        project("a", &["x"], &[W1101, W1102]),
        project("c", &["b"], &[]),
        project("b", &["x"], &[W1101]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[]));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1101])));
}

#[test]
fn parent_project_wide_is_absorbed_by_every_retained_package() {
    let graphs = [graph(vec![
        project("app", &["a"], &[]),
        project("a", &["x"], &[W1102]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[W1101]));

    let retained = result.no_warn(&fw(NET6), &id("x")).unwrap();
    assert!(retained.is_superset(&codes(&[W1101])));
    assert_eq!(*retained, codes(&[W1101, W1102]));
}

#[test]
fn insertion_order_does_not_change_the_result() {
    let forward = graph(vec![
        project("app", &["a", "b"], &[]),
        project("a", &["x"], &[W1101, W1102]),
        project("b", &["x"], &[W1102, W1103]),
        package("x", &[]),
    ]);
    let backward = graph(vec![
        package("x", &[]),
        project("b", &["x"], &[W1102, W1103]),
        project("a", &["x"], &[W1101, W1102]),
        project("app", &["b", "a"], &[]),
    ]);
    let from_forward = resolve(&[forward], &parent("app", &[]));
    let from_backward = resolve(&[backward], &parent("app", &[]));

    assert_eq!(from_forward, from_backward);
    assert_eq!(
        from_forward.no_warn(&fw(NET6), &id("x")),
        Some(&codes(&[W1102]))
    );
}

#[test]
fn resolving_twice_is_idempotent() {
    let graphs = [graph(vec![
        project("app", &["a"], &[]),
        project("a", &["x"], &[W1101]),
        package("x", &[]),
    ])];
    let parent = parent("app", &[W1701]);

    assert_eq!(resolve(&graphs, &parent), resolve(&graphs, &parent));
}

#[test]
fn walks_for_the_same_framework_union() {
    let first = graph(vec![project("app", &["x"], &[]), package("x", &[])]);
    let second = graph(vec![
        project("app", &["a"], &[]),
        project("a", &["x"], &[W1102]),
        package("x", &[]),
    ]);
    let result = resolve(&[first, second], &parent("app", &[W1101]));

    assert_eq!(
        result.no_warn(&fw(NET6), &id("x")),
        Some(&codes(&[W1101, W1102]))
    );
    assert_eq!(result.project_frameworks(), [fw(NET6)]);
}

#[test]
fn parent_package_specific_is_extracted_per_framework() {
    let mut properties = wide_properties(&[]);
    properties.package_specific.add(W1604, "x", [fw(NET6)]);
    properties.package_specific.add(W1605, "x", [fw(NET5)]);
    let net6 = graph(vec![project("app", &["x"], &[]), package("x", &[])]);
    let net5 = graph_for(
        NET5,
        vec![project("app", &["x"], &[]), package("x", &[])],
    );
    let result = resolve(&[net6, net5], &parent_with("app", properties));

    assert_eq!(result.no_warn(&fw(NET6), &id("x")), Some(&codes(&[W1604])));
    assert_eq!(result.no_warn(&fw(NET5), &id("x")), Some(&codes(&[W1605])));
    assert_eq!(result.project_frameworks(), [fw(NET6), fw(NET5)]);
}

#[test]
fn every_id_comparison_is_case_insensitive() {
    let graphs = [graph(vec![
        project("app", &["LibFoo"], &[]),
        package("libfoo", &[]),
    ])];
    let result = resolve(&graphs, &parent("App", &[W1101]));

    assert!(result.suppresses(W1101, &id("LIBFOO"), &fw("NET6.0")));
}

#[test]
fn project_node_without_spec_is_an_invariant_violation() {
    let graphs = [graph(vec![FlattenedNode {
        id: id("app"),
        kind: NodeKind::Project,
        outgoing: vec![],
        project: None,
    }])];
    let err = NoWarnResolver::new(SimpleFrameworkResolver)
        .resolve(&graphs, &parent("app", &[]))
        .unwrap_err();

    assert_eq!(err, Error::MissingProjectSpec(id("app")));
}

#[test]
fn empty_node_id_is_an_invariant_violation() {
    let graphs = [graph(vec![
        project("app", &[], &[]),
        package("", &[]),
    ])];
    let err = NoWarnResolver::new(SimpleFrameworkResolver)
        .resolve(&graphs, &parent("app", &[]))
        .unwrap_err();

    assert_eq!(err, Error::EmptyDependencyId);
}

#[test]
fn parent_missing_from_the_graph_is_an_invariant_violation() {
    let graphs = [graph(vec![package("x", &[])])];
    let err = NoWarnResolver::new(SimpleFrameworkResolver)
        .resolve(&graphs, &parent("app", &[]))
        .unwrap_err();

    assert_eq!(err, Error::UnknownParent(id("app")));
}

#[test]
fn result_round_trips_through_serde() {
    let graphs = [graph(vec![
        project("app", &["x"], &[]),
        package("x", &[]),
    ])];
    let result = resolve(&graphs, &parent("app", &[W1101]));

    let json = serde_json::to_string(&result).expect("result should serialize");
    assert!(json.contains("\"W1101\""));
    let back: TransitiveNoWarnSet =
        serde_json::from_str(&json).expect("result should deserialize");
    assert_eq!(result, back);
}
