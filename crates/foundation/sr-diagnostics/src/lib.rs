//! Diagnostic state for semantic analysis
//!
//! This crate provides the mutable diagnostic context shared by all analysis
//! passes of one compilation unit. Besides plain error and warning counting
//! it implements *gagging*: nested suppression spans during which errors are
//! counted but not surfaced, so that speculative analysis (overload
//! resolution attempts, tentative instantiations) can probe a path and roll
//! its diagnostics back if the path is discarded.
//!
//! # Architecture
//!
//! - [`DiagnosticContext`]: counters, gag nesting, speculative-gag marker,
//!   fatal threshold. One instance per compilation unit, passed by reference
//!   through the analysis call chain.
//! - [`DiagnosticSink`]: where surfaced diagnostics go. [`BufferSink`]
//!   collects them for later rendering.
//! - [`GagGuard`] / [`UngagGuard`]: scope-exit guards that keep the gag
//!   nesting balanced on every exit path.
//!
//! # Usage
//!
//! ```rust
//! use sr_diagnostics::{BufferSink, DiagnosticContext};
//! use sr_span::Loc;
//!
//! let sink = BufferSink::new();
//! let diag = DiagnosticContext::new(Box::new(sink.clone()));
//!
//! let gag = diag.gagged();
//! diag.error(&Loc::none(), "probe failed");
//! let had_errors = gag.finish();
//!
//! assert!(had_errors);
//! assert_eq!(diag.errors(), 0); // folded back out
//! assert!(sink.is_empty()); // never surfaced
//! ```

pub mod context;
pub mod sink;

pub use context::{DeprecationPolicy, DiagnosticContext, GagGuard, UngagGuard, FATAL_ERROR_LIMIT};
pub use sink::{BufferSink, Diagnostic, DiagnosticSink, Severity};
