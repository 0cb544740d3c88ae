// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transitive no-warn resolution over resolved target graphs.
//!
//! The resolver answers one question per transitive package: which warning
//! codes does *every* dependency path from the parent project down to that
//! package agree to suppress? Projects along a path union their declared
//! suppressions into the path; paths meeting at a package intersect. A
//! package that any path reaches with no suppression at all drops out of
//! the answer for good.
//!
//! The walk is a FIFO breadth-first traversal with a subset-based admission
//! rule: a node is re-expanded only while an incoming path value can still
//! narrow some downstream result. Stored admission values shrink on every
//! replacement, which bounds the walk on cyclic graphs.

use crate::collection::TransitiveNoWarnSet;
use crate::errors::Error;
use crate::framework::{Framework, FrameworkResolver};
use crate::graph::{
    DependencyId, NodeKind, ParentProject, ProjectWarningSpec, ResolvedTargetGraph,
};
use crate::properties::{NodeWarningProperties, PackageNoWarn};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// Computes transitive no-warn sets for a parent project over its resolved
/// target graphs.
///
/// One [`resolve`](Self::resolve) call is self-contained: all internal
/// caches live and die with it, and separate calls may run in parallel on
/// disjoint inputs. See the [crate documentation](crate) for a worked
/// example.
#[derive(Clone, Debug)]
pub struct NoWarnResolver<F> {
    framework_resolver: F,
}

impl<F: FrameworkResolver> NoWarnResolver<F> {
    /// Creates a new resolver around the pipeline's nearest-framework
    /// selector.
    pub fn new(framework_resolver: F) -> Self {
        NoWarnResolver { framework_resolver }
    }

    /// Resolves the transitive no-warn sets across all of the parent's
    /// target graphs.
    ///
    /// Runtime-qualified graphs (non-empty runtime identifier) are skipped
    /// entirely. Results for the remaining graphs are unioned per
    /// framework. The returned set carries no project-wide codes: the
    /// parent's own project-wide suppression is already in effect
    /// globally, so only the transitive per-package additions surface
    /// here.
    pub fn resolve(
        &self,
        target_graphs: &[ResolvedTargetGraph],
        parent: &ParentProject,
    ) -> Result<TransitiveNoWarnSet, Error> {
        let mut cache = NodeWarningCache::default();
        let mut out = TransitiveNoWarnSet::new();
        for graph in target_graphs {
            match &graph.runtime_identifier {
                Some(runtime) if !runtime.is_empty() => {
                    trace!(
                        framework = %graph.framework,
                        runtime = %runtime,
                        "skipping runtime-qualified graph"
                    );
                    continue;
                }
                _ => {}
            }
            let parent_no_warn = parent
                .warning_properties
                .package_specific
                .for_framework(&graph.framework);
            let no_warn = self.walk(graph, parent, parent_no_warn, &mut cache)?;
            out.extend_framework(graph.framework.clone(), no_warn);
        }
        Ok(out)
    }

    /// Walks one resolved graph, returning the per-package codes retained
    /// across every reaching path.
    fn walk<'g>(
        &self,
        graph: &'g ResolvedTargetGraph,
        parent: &ParentProject,
        parent_no_warn: PackageNoWarn,
        cache: &mut NodeWarningCache,
    ) -> Result<PackageNoWarn, Error> {
        debug!(
            framework = %graph.framework,
            nodes = graph.flattened.len(),
            "walking target graph"
        );

        // Index the flattened graph by id. Projects resolve their nearest
        // framework and pull their warning properties through the cache;
        // packages form the closure the walk has to settle.
        let mut index: HashMap<&'g DependencyId, IndexEntry<'g>> =
            HashMap::with_capacity(graph.flattened.len());
        let mut closure: HashSet<&'g DependencyId> = HashSet::new();
        for node in &graph.flattened {
            if node.id.is_empty() {
                return Err(Error::EmptyDependencyId);
            }
            let (warn, is_project) = match node.kind {
                NodeKind::Project => {
                    let spec = match &node.project {
                        Some(spec) => spec,
                        None => return Err(Error::MissingProjectSpec(node.id.clone())),
                    };
                    let warn = self
                        .framework_resolver
                        .nearest(&spec.frameworks, &graph.framework)
                        .map(|nearest| cache.node_warning_properties(spec, &nearest).clone());
                    (warn, true)
                }
                NodeKind::Package => {
                    closure.insert(&node.id);
                    (None, false)
                }
            };
            index.insert(
                &node.id,
                IndexEntry {
                    outgoing: &node.outgoing,
                    warn,
                    is_project,
                },
            );
        }

        let (parent_id, parent_entry) = match index.get_key_value(&parent.id) {
            Some((&id, entry)) => (id, entry),
            None => return Err(Error::UnknownParent(parent.id.clone())),
        };

        if closure.is_empty() {
            return Ok(PackageNoWarn::new());
        }

        // Seed with the parent's own configuration: its project-wide codes
        // count as suppressed along every path, which keeps the per-path
        // effective computation uniform at package nodes.
        let seed = NodeWarningProperties::new(
            Some(parent.warning_properties.project_wide.clone()),
            Some(parent_no_warn),
        );
        let mut seen: HashMap<&'g DependencyId, NodeWarningProperties> = HashMap::new();
        seen.insert(parent_id, seed.clone());
        let mut queue: VecDeque<DependencyNode<'g>> = parent_entry
            .outgoing
            .iter()
            .map(|id| DependencyNode {
                id,
                warn: seed.clone(),
            })
            .collect();

        let mut result = PackageNoWarn::new();
        while let Some(node) = queue.pop_front() {
            let entry = match index.get(node.id) {
                Some(entry) => entry,
                // Edges may reference ids the graph never defined.
                None => continue,
            };
            if !admit(&mut seen, node.id, &node.warn) {
                continue;
            }
            if entry.is_project {
                let merged = match &entry.warn {
                    Some(own) => node.warn.merge(own),
                    None => node.warn.clone(),
                };
                for dep in entry.outgoing {
                    queue.push_back(DependencyNode {
                        id: dep,
                        warn: merged.clone(),
                    });
                }
            } else if closure.contains(node.id) {
                let effective = node
                    .warn
                    .extract_for_package(node.id)
                    .unwrap_or_default();
                let retained = match result.get_mut(node.id) {
                    Some(current) => {
                        current.retain(|code| effective.contains(code));
                        !current.is_empty()
                    }
                    None => {
                        if effective.is_empty() {
                            false
                        } else {
                            result.insert(node.id.clone(), effective);
                            true
                        }
                    }
                };
                if !retained {
                    // Intersection can only shrink: once a path reaches
                    // this package with nothing, it is settled for good.
                    result.remove(node.id);
                    closure.remove(node.id);
                    trace!(package = %node.id, "package settled with no suppression");
                    if closure.is_empty() {
                        debug!("closure drained, stopping walk");
                        break;
                    }
                }
                // Packages contribute no configuration of their own; the
                // path value continues unchanged.
                for dep in entry.outgoing {
                    queue.push_back(DependencyNode {
                        id: dep,
                        warn: node.warn.clone(),
                    });
                }
            }
            // A package outside the closure is settled; its edges stay
            // unexplored.
        }
        Ok(result)
    }
}

/// One indexed node of a flattened graph.
#[derive(Clone, Debug)]
struct IndexEntry<'g> {
    outgoing: &'g [DependencyId],
    /// The node's own warning properties. Present only for projects whose
    /// nearest framework resolved.
    warn: Option<NodeWarningProperties>,
    is_project: bool,
}

/// A queued unit of work: a node plus the suppression accumulated along
/// the path that led to it.
#[derive(Clone, Debug, Eq, PartialEq)]
struct DependencyNode<'g> {
    id: &'g DependencyId,
    warn: NodeWarningProperties,
}

/// The admission rule. Returns true if the dequeued node should expand.
///
/// A node never seen before is admitted and its path value recorded. After
/// that, the stored value is a pruning hypothesis: if it is already a
/// subset of the incoming value, everything reachable from here has been
/// explored with at-most-this-much suppression and the incoming path
/// cannot narrow any result, so it is refused. Otherwise the stored value
/// is replaced by the intersection (strictly smaller, which is what
/// guarantees convergence on cycles) and the node expands again.
fn admit<'g>(
    seen: &mut HashMap<&'g DependencyId, NodeWarningProperties>,
    id: &'g DependencyId,
    incoming: &NodeWarningProperties,
) -> bool {
    match seen.get(id) {
        None => {
            seen.insert(id, incoming.clone());
            true
        }
        Some(prior) => {
            if prior.is_subset_of(incoming) {
                trace!(node = %id, "admission refused, already covered");
                return false;
            }
            let replacement = incoming.intersect(prior);
            seen.insert(id, replacement);
            true
        }
    }
}

/// Per-resolve cache of computed node warning properties, keyed by project
/// path (case-insensitive) and framework. Amortizes repeated visits to the
/// same referenced project across target graphs.
#[derive(Debug, Default)]
struct NodeWarningCache {
    inner: HashMap<String, HashMap<Framework, NodeWarningProperties>>,
}

impl NodeWarningCache {
    fn node_warning_properties(
        &mut self,
        spec: &ProjectWarningSpec,
        framework: &Framework,
    ) -> &NodeWarningProperties {
        self.inner
            .entry(spec.path.as_str().to_ascii_lowercase())
            .or_default()
            .entry(framework.clone())
            .or_insert_with(|| {
                NodeWarningProperties::new(
                    Some(spec.warning_properties.project_wide.clone()),
                    Some(spec.warning_properties.package_specific.for_framework(framework)),
                )
            })
    }
}
