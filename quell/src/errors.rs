// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contains types that describe errors that `quell` methods can return.

use crate::graph::DependencyId;
use std::error;
use std::fmt;

use Error::*;

/// Error type describing the sorts of errors `quell` can return.
///
/// The resolver is total over well-formed inputs: missing configuration,
/// unresolved frameworks and dangling edges all degrade silently. The
/// variants here are caller-side invariant violations and are not
/// recoverable.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A flattened graph node carried an empty dependency id.
    EmptyDependencyId,
    /// A project-kind node in a flattened graph was missing its warning spec
    /// payload.
    MissingProjectSpec(DependencyId),
    /// The parent project id was not present in a graph's flattened closure,
    /// so the walk has nowhere to start.
    UnknownParent(DependencyId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyDependencyId => write!(f, "flattened graph node has an empty id"),
            MissingProjectSpec(id) => {
                write!(f, "project node '{}' is missing its warning spec", id)
            }
            UnknownParent(id) => {
                write!(f, "parent project '{}' not found in flattened graph", id)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            EmptyDependencyId => None,
            MissingProjectSpec(_) => None,
            UnknownParent(_) => None,
        }
    }
}
