// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compute transitive no-warn sets over resolved dependency graphs.
//!
//! `quell` is the warning-suppression step of a package-manager restore
//! pipeline. Projects declare which restore diagnostics to suppress, either
//! project-wide or per package id, and those declarations flow down through
//! project references. For each package in a parent project's dependency
//! closure, `quell` computes the set of [`WarningCode`]s that every path
//! from the parent to that package suppresses: the codes it is safe not to
//! report for that package.
//!
//! The heart of the computation is an asymmetry between two operators:
//! along a single dependency path, project configurations *union* together
//! (each referenced project adds to what is suppressed); across the
//! different paths reaching a package, the per-path results *intersect* (a
//! warning stays suppressed only if every path suppressed it). A
//! subset-based admission rule prunes redundant re-walks while preserving
//! that algebra, and keeps the traversal bounded on cyclic graphs.
//!
//! The crate performs no I/O and builds no graphs of its own: the restore
//! pipeline delivers already-resolved, flattened graphs
//! ([`ResolvedTargetGraph`]) plus the parent's configuration
//! ([`ParentProject`]), and consumes the resulting [`TransitiveNoWarnSet`].
//!
//! # Examples
//!
//! A parent that suppresses `W1603` project-wide passes it on to a direct
//! package dependency:
//!
//! ```
//! use quell::{
//!     DependencyId, FlattenedNode, Framework, NoWarnResolver, ParentProject,
//!     ProjectWarningProperties, ProjectWarningSpec, ResolvedTargetGraph,
//!     SimpleFrameworkResolver, WarningCode,
//! };
//!
//! let mut warning_properties = ProjectWarningProperties::new();
//! warning_properties.project_wide.insert(WarningCode::W1603);
//!
//! let parent = ParentProject {
//!     id: "app".into(),
//!     path: "projects/app".into(),
//!     target_frameworks: vec![Framework::new("net6.0")],
//!     warning_properties: warning_properties.clone(),
//! };
//!
//! let graph = ResolvedTargetGraph {
//!     framework: Framework::new("net6.0"),
//!     runtime_identifier: None,
//!     flattened: vec![
//!         FlattenedNode::project(
//!             "app",
//!             ["libfoo"],
//!             ProjectWarningSpec {
//!                 path: "projects/app".into(),
//!                 frameworks: vec![Framework::new("net6.0")],
//!                 warning_properties,
//!             },
//!         ),
//!         FlattenedNode::package("libfoo", Vec::<&str>::new()),
//!     ],
//! };
//!
//! let resolver = NoWarnResolver::new(SimpleFrameworkResolver);
//! let no_warn = resolver.resolve(&[graph], &parent).unwrap();
//! assert!(no_warn.suppresses(
//!     WarningCode::W1603,
//!     &DependencyId::new("libfoo"),
//!     &Framework::new("net6.0"),
//! ));
//! ```

#![warn(missing_docs)]

mod caseless;
mod collection;
mod diagnostic;
pub mod errors;
mod framework;
mod graph;
mod nowarn;
mod properties;
#[cfg(test)]
mod unit_tests;

pub use collection::TransitiveNoWarnSet;
pub use diagnostic::{ParseWarningCodeError, WarningCode};
pub use errors::Error;
pub use framework::{Framework, FrameworkResolver, SimpleFrameworkResolver};
pub use graph::{
    DependencyId, FlattenedNode, NodeKind, ParentProject, ProjectWarningSpec, ResolvedTargetGraph,
};
pub use nowarn::NoWarnResolver;
pub use properties::{
    NodeWarningProperties, PackageNoWarn, PackageSpecificWarningProperties,
    ProjectWarningProperties,
};

// Public re-export for the path type used in APIs. The no_inline ensures it
// shows up as a re-export in documentation.
#[doc(no_inline)]
pub use camino::Utf8PathBuf;
