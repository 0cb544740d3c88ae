// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared builders so scenario graphs read like adjacency lists.

use crate::{
    DependencyId, FlattenedNode, Framework, NoWarnResolver, ParentProject,
    ProjectWarningProperties, ProjectWarningSpec, ResolvedTargetGraph, SimpleFrameworkResolver,
    TransitiveNoWarnSet, WarningCode,
};
use std::collections::BTreeSet;

pub(crate) static NET6: &str = "net6.0";
pub(crate) static NET5: &str = "net5.0";

pub(crate) fn fw(name: &str) -> Framework {
    Framework::new(name)
}

pub(crate) fn id(name: &str) -> DependencyId {
    DependencyId::new(name)
}

pub(crate) fn codes(list: &[WarningCode]) -> BTreeSet<WarningCode> {
    list.iter().copied().collect()
}

/// Properties with only project-wide codes.
pub(crate) fn wide_properties(list: &[WarningCode]) -> ProjectWarningProperties {
    let mut properties = ProjectWarningProperties::new();
    properties.project_wide.extend(list.iter().copied());
    properties
}

/// A spec for `name` declaring both test frameworks.
pub(crate) fn spec_for(name: &str, properties: ProjectWarningProperties) -> ProjectWarningSpec {
    spec_targeting(name, &[NET6, NET5], properties)
}

pub(crate) fn spec_targeting(
    name: &str,
    frameworks: &[&str],
    properties: ProjectWarningProperties,
) -> ProjectWarningSpec {
    ProjectWarningSpec {
        path: format!("projects/{}", name).into(),
        frameworks: frameworks.iter().copied().map(fw).collect(),
        warning_properties: properties,
    }
}

/// A project node with project-wide suppressions only.
pub(crate) fn project(name: &str, outgoing: &[&str], wide: &[WarningCode]) -> FlattenedNode {
    project_with(name, outgoing, wide_properties(wide))
}

pub(crate) fn project_with(
    name: &str,
    outgoing: &[&str],
    properties: ProjectWarningProperties,
) -> FlattenedNode {
    FlattenedNode::project(name, outgoing.iter().copied(), spec_for(name, properties))
}

/// A project node that only declares the given frameworks.
pub(crate) fn project_targeting(
    name: &str,
    frameworks: &[&str],
    outgoing: &[&str],
    wide: &[WarningCode],
) -> FlattenedNode {
    FlattenedNode::project(
        name,
        outgoing.iter().copied(),
        spec_targeting(name, frameworks, wide_properties(wide)),
    )
}

pub(crate) fn package(name: &str, outgoing: &[&str]) -> FlattenedNode {
    FlattenedNode::package(name, outgoing.iter().copied())
}

pub(crate) fn graph(flattened: Vec<FlattenedNode>) -> ResolvedTargetGraph {
    graph_for(NET6, flattened)
}

pub(crate) fn graph_for(framework: &str, flattened: Vec<FlattenedNode>) -> ResolvedTargetGraph {
    ResolvedTargetGraph {
        framework: fw(framework),
        runtime_identifier: None,
        flattened,
    }
}

pub(crate) fn parent(name: &str, wide: &[WarningCode]) -> ParentProject {
    parent_with(name, wide_properties(wide))
}

pub(crate) fn parent_with(name: &str, properties: ProjectWarningProperties) -> ParentProject {
    ParentProject {
        id: id(name),
        path: format!("projects/{}", name).into(),
        target_frameworks: vec![fw(NET6), fw(NET5)],
        warning_properties: properties,
    }
}

pub(crate) fn resolve(
    graphs: &[ResolvedTargetGraph],
    parent: &ParentProject,
) -> TransitiveNoWarnSet {
    NoWarnResolver::new(SimpleFrameworkResolver)
        .resolve(graphs, parent)
        .expect("well-formed test graphs should resolve")
}
