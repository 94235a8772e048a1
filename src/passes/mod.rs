//! The GIL transformation passes and their execution engine.
//!
//! Passes are registered in the [`PassKind`] table: one variant per pass, in
//! pipeline order, with a kebab-case name derived from the variant. The
//! [`manager::PassManager`] walks the configured table and runs whatever is
//! enabled; there is no dependency resolution or reordering, declaration
//! order *is* execution order, which keeps pipeline behavior deterministic
//! and auditable.
//!
//! A pass reports problems with the program exclusively through the
//! [`DiagnosticManager`]; it never stops the pipeline. Only mechanical
//! failures (arena exhaustion, a broken trace sink) abort a run.

use crate::{context::Context, diagnostics::DiagnosticManager, gil::Module};

mod dead_code_elimination;
mod detect_uninitialized;
mod terminator_check;
mod void_main;

pub mod manager;
pub mod options;

pub use manager::{PassConfig, PassError, PassManager, PassPipelineConfig};
pub use options::PassManagerOptions;

/// The static registration table of every GIL pass, in pipeline order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum PassKind {
    /// Rewrite `main : (..) -> void` to return `i32` zero
    VoidMain,
    /// Remove basic blocks unreachable from the entry block
    DeadCodeElimination,
    /// Report loads from stack slots that were never stored to
    DetectUninitialized,
    /// Report malformed block terminators
    TerminatorCheck,
}

impl PassKind {
    /// Whether the pass runs when no override disables it.
    pub fn default_enabled(self) -> bool {
        match self {
            PassKind::VoidMain
            | PassKind::DeadCodeElimination
            | PassKind::DetectUninitialized
            | PassKind::TerminatorCheck => true,
        }
    }

    /// Executes the pass against `module`, allocating through `ctx` and
    /// reporting through `diagnostics`.
    pub fn run(
        self,
        module: &mut Module,
        ctx: &mut Context,
        diagnostics: &mut DiagnosticManager,
    ) -> Result<(), PassError> {
        match self {
            PassKind::VoidMain => void_main::run(module, ctx, diagnostics),
            PassKind::DeadCodeElimination => dead_code_elimination::run(module, ctx, diagnostics),
            PassKind::DetectUninitialized => detect_uninitialized::run(module, ctx, diagnostics),
            PassKind::TerminatorCheck => terminator_check::run(module, ctx, diagnostics),
        }
    }
}
