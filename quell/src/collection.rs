// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The framework-indexed result of a resolve.

use crate::diagnostic::WarningCode;
use crate::framework::Framework;
use crate::graph::DependencyId;
use crate::properties::{PackageNoWarn, EMPTY_CODES};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The transitive no-warn sets computed for a parent project, indexed by
/// target framework.
///
/// Frameworks appear in the order their graphs were processed, which makes
/// repeated resolves over the same input produce identical serialized
/// output. Framework and package lookups are case-insensitive, like every
/// id comparison in this crate.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TransitiveNoWarnSet {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    package_specific: IndexMap<Framework, PackageNoWarn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    project_frameworks: Vec<Framework>,
}

impl TransitiveNoWarnSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a walk's result for one framework, unioning per package
    /// with anything already present. Always records the framework as
    /// processed, even when the walk retained nothing.
    pub(crate) fn extend_framework(&mut self, framework: Framework, no_warn: PackageNoWarn) {
        if !self.project_frameworks.contains(&framework) {
            self.project_frameworks.push(framework.clone());
        }
        if no_warn.is_empty() {
            return;
        }
        let by_id = self
            .package_specific
            .entry(framework)
            .or_insert_with(PackageNoWarn::new);
        for (id, codes) in no_warn {
            by_id.entry(id).or_default().extend(codes);
        }
    }

    /// The project-wide component of the result.
    ///
    /// Always empty: the parent's project-wide suppression is already in
    /// effect globally, so this resolver surfaces only the transitive
    /// per-package additions.
    pub fn project_wide(&self) -> &BTreeSet<WarningCode> {
        &EMPTY_CODES
    }

    /// The frameworks whose graphs were actually processed, in order.
    pub fn project_frameworks(&self) -> &[Framework] {
        &self.project_frameworks
    }

    /// Iterates over the frameworks that retained at least one suppression.
    pub fn frameworks(&self) -> impl Iterator<Item = &Framework> + '_ {
        self.package_specific.keys()
    }

    /// The codes suppressed for `package` under `framework`, if any.
    pub fn no_warn(
        &self,
        framework: &Framework,
        package: &DependencyId,
    ) -> Option<&BTreeSet<WarningCode>> {
        self.package_specific
            .get(framework)
            .and_then(|by_id| by_id.get(package))
    }

    /// Returns true if `code` would be filtered for `package` under
    /// `framework`.
    pub fn suppresses(
        &self,
        code: WarningCode,
        package: &DependencyId,
        framework: &Framework,
    ) -> bool {
        self.no_warn(framework, package)
            .map_or(false, |codes| codes.contains(&code))
    }

    /// Returns true if no package retained any suppression.
    pub fn is_empty(&self) -> bool {
        self.package_specific.is_empty()
    }

    /// Iterates over every `(framework, package, codes)` entry.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&Framework, &DependencyId, &BTreeSet<WarningCode>)> + '_ {
        self.package_specific
            .iter()
            .flat_map(|(framework, by_id)| {
                by_id.iter().map(move |(id, codes)| (framework, id, codes))
            })
    }
}

impl fmt::Display for TransitiveNoWarnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (framework, id, codes) in self.iter() {
            writeln!(f, "{}: {} -> {}", framework, id, codes.iter().join(", "))?;
        }
        Ok(())
    }
}
