//! String interning for symbol names

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::sync::Arc;

/// Shared string interner
///
/// Cheap to clone; all clones intern into the same table.
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> Symbol {
        self.inner.get_or_intern(name)
    }

    /// Look up a symbol without interning it
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.inner.get(name)
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        self.inner.resolve(&sym)
    }
}
