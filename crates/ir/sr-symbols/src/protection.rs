//! Protection levels and their lattice

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protection attribute of a declaration or base-class edge
///
/// Totally ordered by looseness: `None < Private < Package < Protected <
/// Public < Export`. `None` means no access through the path in question.
#[derive(
    Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Protection {
    /// Not visible through this path at all
    #[default]
    None,
    Private,
    Package,
    Protected,
    Public,
    Export,
}

impl Protection {
    /// The looser of two levels, the one granting more access
    pub fn loosest(self, other: Self) -> Self {
        self.max(other)
    }

    /// Cap this level at the protection of an inheritance edge
    ///
    /// A `public` member seen through a `protected` base edge is at most
    /// `protected`; an edge can only tighten, never loosen.
    pub fn tightened_by(self, edge: Self) -> Self {
        self.min(edge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Private => "private",
            Self::Package => "package",
            Self::Protected => "protected",
            Self::Public => "public",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
