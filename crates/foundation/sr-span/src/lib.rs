//! Source file identities and locations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A unique identifier for a canonical source file
///
/// Two modules are the same module exactly when they were read from the
/// same canonical source file, so this doubles as module identity.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl FileId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A source location as reported in diagnostics
///
/// Compared by value: same filename text, same line, same column means the
/// same location, which is what diagnostic deduplication keys on.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Default)]
pub struct Loc {
    /// Filename as written in the diagnostic, absent for synthesized code
    pub filename: Option<Arc<str>>,
    /// 1-based line number, 0 when unknown
    pub line: u32,
    /// 1-based column number, 0 when unknown
    pub column: u32,
}

impl Loc {
    pub fn new(filename: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            filename: Some(filename.into()),
            line,
            column,
        }
    }

    /// A location with no source information
    pub fn none() -> Self {
        Self::default()
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filename) = &self.filename {
            write!(f, "{filename}")?;
        }
        if self.line != 0 {
            write!(f, ":{}", self.line)?;
            if self.column != 0 {
                write!(f, ":{}", self.column)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_display() {
        assert_eq!(Loc::new("app.sr", 4, 9).to_string(), "app.sr:4:9");
        assert_eq!(Loc::new("app.sr", 4, 0).to_string(), "app.sr:4");
        assert_eq!(Loc::none().to_string(), "");
    }

    #[test]
    fn test_loc_value_equality() {
        let a = Loc::new("pkg/mod.sr", 12, 3);
        let b = Loc::new(String::from("pkg/mod.sr"), 12, 3);
        assert_eq!(a, b);
        assert_ne!(a, Loc::new("pkg/mod.sr", 12, 4));
        assert_ne!(a, Loc::new("pkg/other.sr", 12, 3));
    }
}
