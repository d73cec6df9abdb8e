//! Diagnostic creation and severity management.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! category-prefixed codes, a subject (the net, pin or node the message is
//! about), notes and help text. The thread-safe [`DiagnosticSink`] accumulates
//! diagnostics during an analysis run.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
