// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic codes emitted by a package-manager restore pipeline.
//!
//! Suppression is always expressed in terms of these codes: a project file
//! declares a no-warn list such as `W1603;W1701`, and the resolver computes
//! which codes survive along every dependency path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A warning code emitted during restore.
///
/// Codes are grouped by area: `W11xx` version resolution, `W12xx` framework
/// compatibility, `W13xx` dependency declarations, `W16xx` source lookup,
/// `W17xx` local fallbacks, `W18xx` package health.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[non_exhaustive]
pub enum WarningCode {
    /// A dependency resolved to a higher version than the one requested.
    W1101,
    /// A package downgrade was detected while walking the graph.
    W1102,
    /// A stable project depends on a prerelease package.
    W1103,
    /// The package was restored using a fallback framework.
    W1201,
    /// The package may not be fully compatible with the project framework.
    W1202,
    /// A dependency range does not declare a lower bound.
    W1301,
    /// A dependency uses a floating version.
    W1302,
    /// The requested version was not found; the nearest match was used.
    W1603,
    /// A referenced project targets an incompatible framework.
    W1604,
    /// The same dependency resolved more than once with different versions.
    W1605,
    /// The package was restored from a local fallback folder.
    W1701,
    /// The package is marked as deprecated by its source.
    W1801,
    /// The package is missing license metadata.
    W1802,
}

impl WarningCode {
    /// Returns the canonical string form of this code, e.g. `"W1603"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::W1101 => "W1101",
            WarningCode::W1102 => "W1102",
            WarningCode::W1103 => "W1103",
            WarningCode::W1201 => "W1201",
            WarningCode::W1202 => "W1202",
            WarningCode::W1301 => "W1301",
            WarningCode::W1302 => "W1302",
            WarningCode::W1603 => "W1603",
            WarningCode::W1604 => "W1604",
            WarningCode::W1605 => "W1605",
            WarningCode::W1701 => "W1701",
            WarningCode::W1801 => "W1801",
            WarningCode::W1802 => "W1802",
        }
    }

    /// Parses a no-warn list as found in project files, e.g. `"W1603;W1701"`.
    ///
    /// Entries may be separated by semicolons, commas or whitespace.
    /// Unrecognized entries are ignored rather than rejected: project files
    /// routinely carry codes for pipeline stages this crate knows nothing
    /// about.
    pub fn parse_list(s: &str) -> BTreeSet<WarningCode> {
        s.split(|c: char| c == ';' || c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.parse().ok())
            .collect()
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WarningCode {
    type Err = ParseWarningCodeError;

    fn from_str(s: &str) -> Result<Self, ParseWarningCodeError> {
        match s.to_ascii_uppercase().as_str() {
            "W1101" => Ok(WarningCode::W1101),
            "W1102" => Ok(WarningCode::W1102),
            "W1103" => Ok(WarningCode::W1103),
            "W1201" => Ok(WarningCode::W1201),
            "W1202" => Ok(WarningCode::W1202),
            "W1301" => Ok(WarningCode::W1301),
            "W1302" => Ok(WarningCode::W1302),
            "W1603" => Ok(WarningCode::W1603),
            "W1604" => Ok(WarningCode::W1604),
            "W1605" => Ok(WarningCode::W1605),
            "W1701" => Ok(WarningCode::W1701),
            "W1801" => Ok(WarningCode::W1801),
            "W1802" => Ok(WarningCode::W1802),
            _ => Err(ParseWarningCodeError(s.to_string())),
        }
    }
}

/// An error returned while parsing a [`WarningCode`] from a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseWarningCodeError(String);

impl fmt::Display for ParseWarningCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized warning code: '{}'", self.0)
    }
}

impl std::error::Error for ParseWarningCodeError {}
