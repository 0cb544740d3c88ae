// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Target framework identifiers and the nearest-framework seam.
//!
//! A [`Framework`] is opaque to this crate: the resolver only needs a total,
//! case-insensitive equality for map keys, plus a collaborator-supplied
//! answer to "which of a project's declared frameworks best matches the
//! consumer's?". The latter lives behind [`FrameworkResolver`] so the full
//! compatibility tables stay with the restore pipeline that owns them.

use crate::caseless;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A target framework identifier, e.g. `net6.0`.
///
/// Equality, ordering and hashing are ASCII-case-insensitive; the original
/// spelling is preserved for display.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Framework(String);

impl Framework {
    /// Creates a new framework identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Framework(name.into())
    }

    /// Returns the framework name as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Framework {
    fn eq(&self, other: &Self) -> bool {
        caseless::eq(&self.0, &other.0)
    }
}

impl Eq for Framework {}

impl PartialOrd for Framework {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Framework {
    fn cmp(&self, other: &Self) -> Ordering {
        caseless::cmp(&self.0, &other.0)
    }
}

impl Hash for Framework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        caseless::hash(&self.0, state);
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Framework {
    fn from(name: &str) -> Self {
        Framework::new(name)
    }
}

impl From<String> for Framework {
    fn from(name: String) -> Self {
        Framework::new(name)
    }
}

/// Selects the nearest compatible framework for a referenced project.
///
/// Implemented by the restore pipeline, which owns the actual compatibility
/// rules. The resolver treats `None` as "this project has no slice for the
/// consumer's framework": its edges are still walked but it contributes no
/// suppression.
pub trait FrameworkResolver {
    /// Returns the candidate that best matches `desired`, or `None` if no
    /// candidate is compatible.
    fn nearest(&self, candidates: &[Framework], desired: &Framework) -> Option<Framework>;
}

/// A [`FrameworkResolver`] that only accepts exact (case-insensitive)
/// matches.
///
/// Suitable for tests and for pipelines that have already aligned every
/// project to a single framework spelling.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleFrameworkResolver;

impl FrameworkResolver for SimpleFrameworkResolver {
    fn nearest(&self, candidates: &[Framework], desired: &Framework) -> Option<Framework> {
        candidates.iter().find(|&candidate| candidate == desired).cloned()
    }
}

impl<'a, T: FrameworkResolver + ?Sized> FrameworkResolver for &'a T {
    fn nearest(&self, candidates: &[Framework], desired: &Framework) -> Option<Framework> {
        (**self).nearest(candidates, desired)
    }
}
