//! Collection and rendering of problems found in the program being compiled.
//!
//! Passes and checkers record structured reports here and keep going; nothing
//! in this module ever stops the pipeline. Whether recorded errors are fatal
//! to the overall compilation is the driver's decision, made after the
//! pipeline has run to completion.

use std::io;

use colored::Colorize;

use crate::source::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational message
    Note,
    /// Does not prevent compilation
    Warning,
    /// Prevents code generation
    Error,
    /// Unrecoverable, the driver should stop after the current stage
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<Span>,
}

/// Accumulates diagnostics for one compilation. The manager records and
/// renders; it never inspects severity to gate anything.
#[derive(Debug, Default)]
pub struct DiagnosticManager {
    messages: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(
        &mut self,
        severity: Severity,
        location: Option<Span>,
        message: impl Into<String>,
    ) {
        if severity >= Severity::Error {
            self.has_errors = true;
        }

        self.messages.push(Diagnostic {
            severity,
            message: message.into(),
            location,
        });
    }

    pub fn note(&mut self, location: Option<Span>, message: impl Into<String>) {
        self.report(Severity::Note, location, message);
    }

    pub fn warning(&mut self, location: Option<Span>, message: impl Into<String>) {
        self.report(Severity::Warning, location, message);
    }

    pub fn error(&mut self, location: Option<Span>, message: impl Into<String>) {
        self.report(Severity::Error, location, message);
    }

    pub fn fatal(&mut self, location: Option<Span>, message: impl Into<String>) {
        self.report(Severity::Fatal, location, message);
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    /// Whether any Error or Fatal diagnostic has been recorded. Checked by
    /// the driver before handing the module to code generation.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn print_all(&self, out: &mut impl io::Write) -> io::Result<()> {
        for diagnostic in &self.messages {
            let severity = match diagnostic.severity {
                Severity::Note => "note".cyan().bold(),
                Severity::Warning => "warning".yellow().bold(),
                Severity::Error => "error".red().bold(),
                Severity::Fatal => "fatal error".red().bold(),
            };

            match diagnostic.location {
                Some(span) => writeln!(out, "{severity}: {} (at {span})", diagnostic.message)?,
                None => writeln!(out, "{severity}: {}", diagnostic.message)?,
            }
        }

        Ok(())
    }
}
