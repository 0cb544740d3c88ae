// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The input data model: resolved dependency graphs as delivered by the
//! restore pipeline.
//!
//! The pipeline hands over one [`ResolvedTargetGraph`] per target framework,
//! already resolved and flattened. Nothing here parses project files or
//! performs version resolution; these are plain value structures consumed by
//! [`NoWarnResolver`](crate::NoWarnResolver).

use crate::caseless;
use crate::framework::Framework;
use crate::properties::ProjectWarningProperties;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An identifier for a package or project in a resolved graph.
///
/// Comparisons, ordering and hashing are ASCII-case-insensitive; the
/// original spelling is preserved for display.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DependencyId(String);

impl DependencyId {
    /// Creates a new dependency id.
    pub fn new(id: impl Into<String>) -> Self {
        DependencyId(id.into())
    }

    /// Returns the id as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for DependencyId {
    fn eq(&self, other: &Self) -> bool {
        caseless::eq(&self.0, &other.0)
    }
}

impl Eq for DependencyId {}

impl PartialOrd for DependencyId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DependencyId {
    fn cmp(&self, other: &Self) -> Ordering {
        caseless::cmp(&self.0, &other.0)
    }
}

impl Hash for DependencyId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        caseless::hash(&self.0, state);
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DependencyId {
    fn from(id: &str) -> Self {
        DependencyId::new(id)
    }
}

impl From<String> for DependencyId {
    fn from(id: String) -> Self {
        DependencyId::new(id)
    }
}

/// Whether a flattened node is a project or a package.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum NodeKind {
    /// A referenced project, carrying its own warning configuration.
    Project,
    /// A restored package. Packages carry no configuration of their own.
    Package,
}

/// A transitive project's own warning declaration, exposed through the
/// flattened graph's match payload.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProjectWarningSpec {
    /// The project's unique path. Used as a cache key; compared
    /// case-insensitively.
    pub path: Utf8PathBuf,
    /// The frameworks the project declares. The nearest-framework selector
    /// picks from these.
    pub frameworks: Vec<Framework>,
    /// The project's declared suppressions.
    pub warning_properties: ProjectWarningProperties,
}

/// One entry of a flattened resolved graph.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlattenedNode {
    /// The dependency id of this node.
    pub id: DependencyId,
    /// Project or package.
    pub kind: NodeKind,
    /// Ids of this node's direct dependencies.
    pub outgoing: Vec<DependencyId>,
    /// The project's warning spec. Required for project nodes, absent for
    /// packages.
    pub project: Option<ProjectWarningSpec>,
}

impl FlattenedNode {
    /// Creates a project node with the given outgoing edges and spec.
    pub fn project(
        id: impl Into<DependencyId>,
        outgoing: impl IntoIterator<Item = impl Into<DependencyId>>,
        spec: ProjectWarningSpec,
    ) -> Self {
        FlattenedNode {
            id: id.into(),
            kind: NodeKind::Project,
            outgoing: outgoing.into_iter().map(Into::into).collect(),
            project: Some(spec),
        }
    }

    /// Creates a package node with the given outgoing edges.
    pub fn package(
        id: impl Into<DependencyId>,
        outgoing: impl IntoIterator<Item = impl Into<DependencyId>>,
    ) -> Self {
        FlattenedNode {
            id: id.into(),
            kind: NodeKind::Package,
            outgoing: outgoing.into_iter().map(Into::into).collect(),
            project: None,
        }
    }
}

/// A resolved dependency graph for one target framework of the parent
/// project.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolvedTargetGraph {
    /// The target framework this graph was resolved for.
    pub framework: Framework,
    /// The runtime identifier, if this graph is runtime-qualified. Graphs
    /// with a non-empty runtime identifier are skipped by the resolver:
    /// only framework-only graphs contribute suppressions.
    pub runtime_identifier: Option<String>,
    /// The resolved graph as a flat list of nodes with outgoing edges.
    pub flattened: Vec<FlattenedNode>,
}

/// The consuming project whose transitive no-warn sets are being computed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParentProject {
    /// The parent's dependency id as it appears in its own resolved graphs.
    pub id: DependencyId,
    /// The parent's project path.
    pub path: Utf8PathBuf,
    /// The frameworks the parent targets.
    pub target_frameworks: Vec<Framework>,
    /// The parent's declared suppressions.
    pub warning_properties: ProjectWarningProperties,
}
