//! Diagnostic sinks

use sr_span::Loc;
use std::cell::RefCell;
use std::rc::Rc;

/// Severity class of a surfaced diagnostic
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Hard error; counted and subject to the fatal threshold
    Error,
    /// Warning; only surfaced when warnings are enabled
    Warning,
    /// Deprecation message surfaced under the `Warn` policy
    Deprecation,
    /// Supplemental note about the immediately preceding diagnostic
    Note,
}

/// A surfaced diagnostic
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub loc: Loc,
    pub message: String,
}

/// Receiver for surfaced diagnostics
///
/// The context decides *whether* a diagnostic surfaces (gagging, warning
/// switch, deprecation policy); the sink decides what surfacing means.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, loc: &Loc, message: &str);
}

/// Sink that collects diagnostics in memory
///
/// Clones share the same buffer, so a test or driver can keep one clone and
/// hand the other to the context.
#[derive(Clone, Default)]
pub struct BufferSink {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all collected diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow_mut().drain(..).collect()
    }

    /// Collected messages, in emission order
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics
            .borrow()
            .iter()
            .map(|diag| diag.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticSink for BufferSink {
    fn emit(&mut self, severity: Severity, loc: &Loc, message: &str) {
        self.diagnostics.borrow_mut().push(Diagnostic {
            severity,
            loc: loc.clone(),
            message: message.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_shares_storage_across_clones() {
        let sink = BufferSink::new();
        let mut writer = sink.clone();
        writer.emit(Severity::Error, &Loc::new("a.sr", 1, 1), "boom");

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.messages(), vec!["boom".to_owned()]);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }
}
