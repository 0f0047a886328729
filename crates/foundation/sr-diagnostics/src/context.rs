//! The diagnostic context: counters, gag nesting, fatal threshold

use crate::sink::{DiagnosticSink, Severity};
use sr_span::Loc;
use std::cell::{Cell, RefCell};
use tracing::{debug, trace};

/// Number of surfaced errors after which compilation is aborted
///
/// Moderates a blizzard of cascading messages: the error that would be
/// surfaced after this many are already counted triggers the fatal handler.
pub const FATAL_ERROR_LIMIT: u32 = 20;

/// What to do with deprecation messages
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DeprecationPolicy {
    /// Treat use of deprecated declarations as a hard error
    #[default]
    Error,
    /// Silently allow deprecated declarations
    Allow,
    /// Surface a deprecation message but keep going
    Warn,
}

/// Mutable diagnostic state for one compilation unit
///
/// Counters use interior mutability so that gag guards can hold a shared
/// borrow of the context while analysis continues to report through it.
/// The invariant `gagged_errors <= errors` holds at all times, and gag
/// depth changes are strictly LIFO.
pub struct DiagnosticContext {
    errors: Cell<u32>,
    warnings: Cell<u32>,
    gagged_errors: Cell<u32>,
    gag: Cell<u32>,
    speculative_gag: Cell<u32>,
    warnings_enabled: bool,
    deprecation_policy: DeprecationPolicy,
    sink: RefCell<Box<dyn DiagnosticSink>>,
    fatal_handler: RefCell<Box<dyn FnMut()>>,
}

impl DiagnosticContext {
    pub fn new(sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            errors: Cell::new(0),
            warnings: Cell::new(0),
            gagged_errors: Cell::new(0),
            gag: Cell::new(0),
            speculative_gag: Cell::new(0),
            warnings_enabled: true,
            deprecation_policy: DeprecationPolicy::default(),
            sink: RefCell::new(sink),
            fatal_handler: RefCell::new(Box::new(|| std::process::exit(1))),
        }
    }

    /// Disable or enable warning output
    pub fn set_warnings_enabled(&mut self, enabled: bool) {
        self.warnings_enabled = enabled;
    }

    pub fn set_deprecation_policy(&mut self, policy: DeprecationPolicy) {
        self.deprecation_policy = policy;
    }

    /// Replace the fatal handler
    ///
    /// The default handler terminates the process and never returns. A
    /// replacement that does return resumes analysis, which is only
    /// meaningful for tests and embedding drivers.
    pub fn set_fatal_handler(&mut self, handler: Box<dyn FnMut()>) {
        self.fatal_handler = RefCell::new(handler);
    }

    /// Total hard errors raised, including currently gagged ones
    pub fn errors(&self) -> u32 {
        self.errors.get()
    }

    /// Warnings surfaced so far
    pub fn warnings(&self) -> u32 {
        self.warnings.get()
    }

    /// Errors raised inside the current gag nesting
    pub fn gagged_errors(&self) -> u32 {
        self.gagged_errors.get()
    }

    /// Current gag nesting depth
    pub fn gag_depth(&self) -> u32 {
        self.gag.get()
    }

    /// Whether diagnostics are currently suppressed
    pub fn is_gagging(&self) -> bool {
        self.gag.get() != 0
    }

    /// Whether the current gag was opened for purely speculative analysis
    pub fn is_speculative_gagging(&self) -> bool {
        self.gag.get() != 0 && self.gag.get() == self.speculative_gag.get()
    }

    /// Open a gag span; returns the gagged-error baseline to pass to
    /// [`end_gagging`](Self::end_gagging)
    pub fn start_gagging(&self) -> u32 {
        self.gag.set(self.gag.get() + 1);
        debug!(depth = self.gag.get(), "start gagging");
        self.gagged_errors.get()
    }

    /// Close the innermost gag span
    ///
    /// Folds the errors raised inside the span back out of the total and
    /// restores the gagged baseline. Returns whether any error was raised
    /// inside the span.
    pub fn end_gagging(&self, baseline: u32) -> bool {
        let any_errors = self.gagged_errors.get() != baseline;
        self.gag.set(self.gag.get() - 1);
        debug!(depth = self.gag.get(), any_errors, "end gagging");

        self.errors
            .set(self.errors.get() - (self.gagged_errors.get() - baseline));
        self.gagged_errors.set(baseline);
        any_errors
    }

    /// Open a gag span with a scope-exit guard
    pub fn gagged(&self) -> GagGuard<'_> {
        GagGuard {
            ctx: self,
            baseline: self.start_gagging(),
            old_speculative: None,
            finished: false,
        }
    }

    /// Open a *speculative* gag span with a scope-exit guard
    ///
    /// Diagnostics inside the span must never surface, even where nested
    /// non-speculative logic would re-enable reporting.
    pub fn speculative(&self) -> GagGuard<'_> {
        let baseline = self.start_gagging();
        let old_speculative = self.speculative_gag.get();
        self.speculative_gag.set(self.gag.get());
        GagGuard {
            ctx: self,
            baseline,
            old_speculative: Some(old_speculative),
            finished: false,
        }
    }

    /// Temporarily lift a speculative gag for a non-speculative symbol
    ///
    /// When the current gag exists only for speculation and the symbol being
    /// analyzed is not itself speculative, its diagnostics must surface, so
    /// gag depth is forced to zero until the returned guard drops.
    pub fn ungag_speculative(&self, symbol_is_speculative: bool) -> UngagGuard<'_> {
        let old_gag = self.gag.get();
        if self.is_speculative_gagging() && !symbol_is_speculative {
            debug!(old_gag, "lifting speculative gag");
            self.gag.set(0);
        }
        UngagGuard { ctx: self, old_gag }
    }

    /// Count an error that was detected but reported elsewhere
    pub fn increase_error_count(&self) {
        if self.gag.get() != 0 {
            self.gagged_errors.set(self.gagged_errors.get() + 1);
        }
        self.errors.set(self.errors.get() + 1);
    }

    /// Report a hard error
    ///
    /// Always counted. Surfaced only when not gagged; surfacing past the
    /// fatal limit invokes the fatal handler.
    pub fn error(&self, loc: &Loc, message: &str) {
        if self.gag.get() == 0 {
            self.sink.borrow_mut().emit(Severity::Error, loc, message);
            if self.errors.get() >= FATAL_ERROR_LIMIT {
                (*self.fatal_handler.borrow_mut())();
            }
        } else {
            trace!(%loc, text = message, "gagged error");
            self.gagged_errors.set(self.gagged_errors.get() + 1);
        }
        self.errors.set(self.errors.get() + 1);
    }

    /// Supplementary message about the last error; never counted
    pub fn error_supplemental(&self, loc: &Loc, message: &str) {
        if self.gag.get() == 0 {
            self.sink.borrow_mut().emit(Severity::Note, loc, message);
        }
    }

    /// Report a warning
    ///
    /// Gagged warnings are dropped entirely, they are not counted the way
    /// gagged errors are.
    pub fn warning(&self, loc: &Loc, message: &str) {
        if self.warnings_enabled && self.gag.get() == 0 {
            self.sink.borrow_mut().emit(Severity::Warning, loc, message);
            self.warnings.set(self.warnings.get() + 1);
        }
    }

    /// Report use of a deprecated declaration, dispatching on policy
    pub fn deprecation(&self, loc: &Loc, message: &str) {
        match self.deprecation_policy {
            DeprecationPolicy::Error => self.error(loc, message),
            DeprecationPolicy::Allow => {}
            DeprecationPolicy::Warn => {
                if self.gag.get() == 0 {
                    self.sink.borrow_mut().emit(Severity::Deprecation, loc, message);
                }
            }
        }
    }

    /// Deprecation message prefixed with the declaration's kind and name
    pub fn deprecation_with_context(&self, loc: &Loc, kind: &str, name: &str, message: &str) {
        self.deprecation(loc, &format!("{kind} {name} {message}"));
    }
}

/// Scope-exit guard for a gag span
///
/// Dropping the guard closes the span; [`finish`](Self::finish) closes it
/// and reports whether any error was raised inside.
pub struct GagGuard<'ctx> {
    ctx: &'ctx DiagnosticContext,
    baseline: u32,
    old_speculative: Option<u32>,
    finished: bool,
}

impl GagGuard<'_> {
    /// Close the span, returning whether any error was raised inside it
    pub fn finish(mut self) -> bool {
        self.finished = true;
        self.close()
    }

    fn close(&mut self) -> bool {
        if let Some(old) = self.old_speculative {
            self.ctx.speculative_gag.set(old);
        }
        self.ctx.end_gagging(self.baseline)
    }
}

impl Drop for GagGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.close();
        }
    }
}

/// Scope-exit guard restoring gag depth after a speculative lift
pub struct UngagGuard<'ctx> {
    ctx: &'ctx DiagnosticContext,
    old_gag: u32,
}

impl Drop for UngagGuard<'_> {
    fn drop(&mut self) {
        self.ctx.gag.set(self.old_gag);
    }
}
