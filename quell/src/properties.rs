// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warning-suppression structures and the merge/intersect algebra over them.
//!
//! Two shapes of suppression exist:
//!
//! * *project-wide*: a set of [`WarningCode`]s suppressed for every package
//!   under a project;
//! * *package-specific*: codes suppressed only for a named package id, as
//!   declared (`code → package id → frameworks`) or as carried along a walk
//!   path (`package id → codes`).
//!
//! [`NodeWarningProperties`] pairs the two and is the value propagated along
//! dependency paths. Along a single path the pair only grows (projects
//! *union* their configuration in); across paths to the same package the
//! resolver *intersects*. Either component may be absent: absent compares
//! and hashes as empty, but inside the admission cache's
//! [`intersect`](NodeWarningProperties::intersect) it means "no constraint
//! yet" and yields the other side.

use crate::diagnostic::WarningCode;
use crate::framework::Framework;
use crate::graph::DependencyId;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// Per-package suppressed codes, as carried along walk paths and returned
/// per framework.
pub type PackageNoWarn = BTreeMap<DependencyId, BTreeSet<WarningCode>>;

pub(crate) static EMPTY_CODES: Lazy<BTreeSet<WarningCode>> = Lazy::new(BTreeSet::new);

/// A project's declared suppressions: project-wide plus package-specific.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProjectWarningProperties {
    /// Codes suppressed for every package under the project.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub project_wide: BTreeSet<WarningCode>,
    /// Codes suppressed only for the named package, per framework.
    #[serde(default, skip_serializing_if = "PackageSpecificWarningProperties::is_empty")]
    pub package_specific: PackageSpecificWarningProperties,
}

impl ProjectWarningProperties {
    /// Creates an empty set of properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no suppression is declared at all.
    pub fn is_empty(&self) -> bool {
        self.project_wide.is_empty() && self.package_specific.is_empty()
    }
}

/// Package-specific suppressions as declared in a project:
/// `code → package id → frameworks`.
///
/// Ids and frameworks compare case-insensitively. An empty framework set is
/// never stored against a live `(code, id)` entry.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PackageSpecificWarningProperties {
    inner: BTreeMap<WarningCode, BTreeMap<DependencyId, BTreeSet<Framework>>>,
}

impl PackageSpecificWarningProperties {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `code` suppressed for `id` on the given frameworks.
    pub fn add(
        &mut self,
        code: WarningCode,
        id: impl Into<DependencyId>,
        frameworks: impl IntoIterator<Item = Framework>,
    ) {
        let frameworks: BTreeSet<_> = frameworks.into_iter().collect();
        if frameworks.is_empty() {
            return;
        }
        self.inner
            .entry(code)
            .or_default()
            .entry(id.into())
            .or_default()
            .extend(frameworks);
    }

    /// Returns true if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Reindexes to `package id → codes` for a single framework.
    pub fn for_framework(&self, framework: &Framework) -> PackageNoWarn {
        let mut out = PackageNoWarn::new();
        for (&code, by_id) in &self.inner {
            for (id, frameworks) in by_id {
                if frameworks.contains(framework) {
                    out.entry(id.clone()).or_default().insert(code);
                }
            }
        }
        out
    }

    /// Reindexes to `framework → package id → codes`, covering every
    /// framework mentioned anywhere in the declaration.
    pub fn by_framework(&self) -> IndexMap<Framework, PackageNoWarn> {
        let mut out: IndexMap<Framework, PackageNoWarn> = IndexMap::new();
        for (&code, by_id) in &self.inner {
            for (id, frameworks) in by_id {
                for framework in frameworks {
                    out.entry(framework.clone())
                        .or_insert_with(PackageNoWarn::new)
                        .entry(id.clone())
                        .or_default()
                        .insert(code);
                }
            }
        }
        out
    }
}

/// The suppression value attached to a node: a project-wide code set and a
/// per-package code map.
///
/// This is both the value carried along walk paths and the value stored in
/// the admission cache. Construction through [`new`](Self::new) normalizes
/// empty components to absent; intersection results keep converged-to-empty
/// components as-is, since "converged to empty" and "unknown" behave
/// differently on the next intersection.
#[derive(Clone, Debug, Default)]
pub struct NodeWarningProperties {
    project_wide: Option<BTreeSet<WarningCode>>,
    package_specific: Option<PackageNoWarn>,
}

impl NodeWarningProperties {
    /// Creates a new value. Empty components normalize to absent, and
    /// packages mapped to no codes are dropped.
    pub fn new(
        project_wide: Option<BTreeSet<WarningCode>>,
        package_specific: Option<PackageNoWarn>,
    ) -> Self {
        let project_wide = project_wide.filter(|codes| !codes.is_empty());
        let package_specific = package_specific
            .map(|mut by_id| {
                by_id.retain(|_, codes| !codes.is_empty());
                by_id
            })
            .filter(|by_id| !by_id.is_empty());
        NodeWarningProperties {
            project_wide,
            package_specific,
        }
    }

    /// Creates a value with both components absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The project-wide component, if present.
    pub fn project_wide(&self) -> Option<&BTreeSet<WarningCode>> {
        self.project_wide.as_ref()
    }

    /// The package-specific component, if present.
    pub fn package_specific(&self) -> Option<&PackageNoWarn> {
        self.package_specific.as_ref()
    }

    /// Returns true if both components are absent or empty.
    pub fn is_empty(&self) -> bool {
        self.project_wide.as_ref().map_or(true, BTreeSet::is_empty)
            && self
                .package_specific
                .as_ref()
                .map_or(true, |by_id| by_id.values().all(BTreeSet::is_empty))
    }

    /// Merges another node's suppressions into this path value: union of
    /// the project-wide sets, per-key union of the package maps.
    pub fn merge(&self, other: &Self) -> Self {
        NodeWarningProperties {
            project_wide: union_codes(self.project_wide.as_ref(), other.project_wide.as_ref()),
            package_specific: merge_package_no_warn(
                self.package_specific.as_ref(),
                other.package_specific.as_ref(),
            ),
        }
    }

    /// Component-wise intersection, treating an absent side as "no
    /// constraint yet".
    ///
    /// For the package maps the intersection runs over the union of keys: a
    /// key missing on one side keeps the other side's codes, and a key
    /// emptied by the intersection stays present so it cannot regrow later.
    pub fn intersect(&self, other: &Self) -> Self {
        NodeWarningProperties {
            project_wide: intersect_codes(self.project_wide.as_ref(), other.project_wide.as_ref()),
            package_specific: intersect_package_no_warn(
                self.package_specific.as_ref(),
                other.package_specific.as_ref(),
            ),
        }
    }

    /// Returns true if every suppression in `self` is already covered by
    /// `other`. Absent components count as empty; an empty value is a
    /// subset of everything.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        codes_subset(self.project_wide.as_ref(), other.project_wide.as_ref())
            && package_subset(
                self.package_specific.as_ref(),
                other.package_specific.as_ref(),
            )
    }

    /// The effective suppression this path carries for one package: the
    /// union of the project-wide set and the package's own entry. `None` if
    /// the path carries nothing for it.
    pub fn extract_for_package(&self, id: &DependencyId) -> Option<BTreeSet<WarningCode>> {
        let specific = self
            .package_specific
            .as_ref()
            .and_then(|by_id| by_id.get(id));
        union_codes(self.project_wide.as_ref(), specific)
    }
}

// Equality and hashing treat absent components as empty, and skip packages
// mapped to no codes, so converged-to-empty values compare equal to their
// canonical forms.

impl PartialEq for NodeWarningProperties {
    fn eq(&self, other: &Self) -> bool {
        let self_wide = self.project_wide.as_ref().unwrap_or(&EMPTY_CODES);
        let other_wide = other.project_wide.as_ref().unwrap_or(&EMPTY_CODES);
        if self_wide != other_wide {
            return false;
        }
        live_entries(self.package_specific.as_ref())
            .eq(live_entries(other.package_specific.as_ref()))
    }
}

impl Eq for NodeWarningProperties {}

impl Hash for NodeWarningProperties {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let project_wide = self.project_wide.as_ref().unwrap_or(&EMPTY_CODES);
        state.write_usize(project_wide.len());
        for code in project_wide {
            code.hash(state);
        }
        state.write_usize(live_entries(self.package_specific.as_ref()).count());
        for (id, codes) in live_entries(self.package_specific.as_ref()) {
            id.hash(state);
            state.write_usize(codes.len());
            for code in codes {
                code.hash(state);
            }
        }
    }
}

fn live_entries(
    by_id: Option<&PackageNoWarn>,
) -> impl Iterator<Item = (&DependencyId, &BTreeSet<WarningCode>)> + '_ {
    by_id
        .into_iter()
        .flatten()
        .filter(|(_, codes)| !codes.is_empty())
}

/// Null-safe union over code sets: an absent side yields the other, and
/// equal inputs are reused rather than recomputed.
pub(crate) fn union_codes(
    a: Option<&BTreeSet<WarningCode>>,
    b: Option<&BTreeSet<WarningCode>>,
) -> Option<BTreeSet<WarningCode>> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (Some(a), Some(b)) => {
            if a == b {
                Some(a.clone())
            } else {
                Some(a.union(b).copied().collect())
            }
        }
    }
}

/// Null-safe intersection over code sets. An absent side means "no
/// constraint yet" and yields the other side.
pub(crate) fn intersect_codes(
    a: Option<&BTreeSet<WarningCode>>,
    b: Option<&BTreeSet<WarningCode>>,
) -> Option<BTreeSet<WarningCode>> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (Some(a), Some(b)) => {
            if a == b {
                Some(a.clone())
            } else {
                Some(a.intersection(b).copied().collect())
            }
        }
    }
}

/// Null-safe per-key union of package maps.
pub(crate) fn merge_package_no_warn(
    a: Option<&PackageNoWarn>,
    b: Option<&PackageNoWarn>,
) -> Option<PackageNoWarn> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (Some(a), Some(b)) => {
            let mut merged = a.clone();
            for (id, codes) in b {
                merged
                    .entry(id.clone())
                    .or_default()
                    .extend(codes.iter().copied());
            }
            Some(merged)
        }
    }
}

/// Intersection of package maps over the union of keys. A key missing on
/// one side keeps the other side's codes; a key present on both sides keeps
/// the intersection, even when it comes out empty.
pub(crate) fn intersect_package_no_warn(
    a: Option<&PackageNoWarn>,
    b: Option<&PackageNoWarn>,
) -> Option<PackageNoWarn> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (Some(a), Some(b)) => {
            let mut out = PackageNoWarn::new();
            for (id, codes) in a {
                match b.get(id) {
                    Some(other) => {
                        out.insert(id.clone(), codes.intersection(other).copied().collect());
                    }
                    None => {
                        out.insert(id.clone(), codes.clone());
                    }
                }
            }
            for (id, codes) in b {
                if !a.contains_key(id) {
                    out.insert(id.clone(), codes.clone());
                }
            }
            Some(out)
        }
    }
}

fn codes_subset(a: Option<&BTreeSet<WarningCode>>, b: Option<&BTreeSet<WarningCode>>) -> bool {
    match a {
        None => true,
        Some(a) if a.is_empty() => true,
        Some(a) => match b {
            None => false,
            Some(b) => a.is_subset(b),
        },
    }
}

fn package_subset(a: Option<&PackageNoWarn>, b: Option<&PackageNoWarn>) -> bool {
    let a = match a {
        None => return true,
        Some(a) => a,
    };
    a.iter().all(|(id, codes)| {
        if codes.is_empty() {
            return true;
        }
        match b.and_then(|b| b.get(id)) {
            Some(other) => codes.is_subset(other),
            None => false,
        }
    })
}
