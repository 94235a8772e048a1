//! Ordered execution of the GIL pass pipeline.
//!
//! The [`PassManager`] runs every enabled pass from its
//! [`PassPipelineConfig`] in table order, writing before/after module
//! listings to its trace sink for passes that ask for them. Disabled passes
//! contribute nothing, not even trace output. Diagnostics reported by a pass
//! never stop the pipeline; the caller checks
//! [`DiagnosticManager::has_errors`](crate::diagnostics::DiagnosticManager::has_errors)
//! once the whole pipeline has run.

use std::io;

use colored::Colorize;
use strum::IntoEnumIterator;

use super::PassKind;
use crate::{
    arena::AllocationError,
    context::Context,
    diagnostics::DiagnosticManager,
    gil::{printer::render_module, Module},
};

#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error("failed to write pass trace: {0}")]
    Trace(#[from] io::Error),
}

/// Per-pass toggles resolved from the defaults and any caller overrides.
#[derive(Debug, Clone)]
pub struct PassConfig {
    pub kind: PassKind,
    pub enabled: bool,
    pub print_before: bool,
    pub print_after: bool,
}

impl PassConfig {
    pub fn new(kind: PassKind) -> Self {
        Self {
            kind,
            enabled: kind.default_enabled(),
            print_before: false,
            print_after: false,
        }
    }
}

/// The full pipeline: one [`PassConfig`] per registered pass, in execution
/// order.
#[derive(Debug, Clone)]
pub struct PassPipelineConfig {
    passes: Vec<PassConfig>,
}

impl Default for PassPipelineConfig {
    fn default() -> Self {
        Self {
            passes: PassKind::iter().map(PassConfig::new).collect(),
        }
    }
}

impl PassPipelineConfig {
    pub fn passes(&self) -> &[PassConfig] {
        &self.passes
    }

    fn pass_config_mut(&mut self, name: &str) -> Option<&mut PassConfig> {
        self.passes
            .iter_mut()
            .find(|pass| pass.kind.to_string() == name)
    }

    // Unknown names are ignored rather than rejected, matching how the
    // option flags behave in the driver.
    pub fn enable_pass(&mut self, name: &str) {
        if let Some(pass) = self.pass_config_mut(name) {
            pass.enabled = true;
        }
    }

    pub fn disable_pass(&mut self, name: &str) {
        if let Some(pass) = self.pass_config_mut(name) {
            pass.enabled = false;
        }
    }

    pub fn print_before(&mut self, name: &str) {
        if let Some(pass) = self.pass_config_mut(name) {
            pass.print_before = true;
        }
    }

    pub fn print_after(&mut self, name: &str) {
        if let Some(pass) = self.pass_config_mut(name) {
            pass.print_after = true;
        }
    }

    pub fn print_before_all(&mut self) {
        for pass in &mut self.passes {
            pass.print_before = true;
        }
    }

    pub fn print_after_all(&mut self) {
        for pass in &mut self.passes {
            pass.print_after = true;
        }
    }
}

pub struct PassManager<'out> {
    config: PassPipelineConfig,
    output: &'out mut dyn io::Write,
    /// Set when the trace sink is not a terminal.
    strip_colors: bool,
}

impl<'out> PassManager<'out> {
    pub fn new(config: PassPipelineConfig, output: &'out mut dyn io::Write) -> Self {
        Self {
            config,
            output,
            strip_colors: false,
        }
    }

    pub fn with_stripped_colors(mut self) -> Self {
        self.strip_colors = true;
        self
    }

    /// Runs every enabled pass over `module`, in pipeline order, regardless
    /// of the diagnostics the earlier passes recorded.
    pub fn run(
        &mut self,
        module: &mut Module,
        ctx: &mut Context,
        diagnostics: &mut DiagnosticManager,
    ) -> Result<(), PassError> {
        let passes = self.config.passes.clone();

        for pass in passes {
            if !pass.enabled {
                continue;
            }

            let name = pass.kind.to_string();

            if pass.print_before {
                self.trace(&format!("GIL before {name} pass"), module, ctx)?;
            }

            tracing::debug!(pass = %name, "running GIL pass");
            pass.kind.run(module, ctx, diagnostics)?;

            if pass.print_after {
                self.trace(&format!("GIL after {name} pass"), module, ctx)?;
            }
        }

        Ok(())
    }

    fn trace(&mut self, description: &str, module: &Module, ctx: &Context) -> Result<(), PassError> {
        let mut text = format!(
            "{}\n{}{}\n",
            format!("// {description}").cyan().bold(),
            render_module(module, ctx),
            format!("// End {description}").cyan().bold()
        );

        if self.strip_colors {
            text = strip_ansi_escapes::strip_str(&text);
        }

        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{PassManager, PassPipelineConfig};
    use crate::{
        context::Context,
        diagnostics::DiagnosticManager,
        gil::{Function, Instruction, Module},
        intern::InternedSymbol,
        passes::PassKind,
        types::TypeKind,
    };

    fn void_main_module(ctx: &mut Context) -> Module {
        let mut module = Module::new("main");

        let void = ctx.types.void();
        let ty = ctx.types.function(vec![], void);
        let mut function = Function::new(InternedSymbol::new("main"), ty);
        let entry = function.add_block(None);
        function
            .blocks
            .get_mut(&entry)
            .unwrap()
            .instructions
            .push(Instruction::Return { value: None });
        ctx.add_function(&mut module, function).unwrap();

        module
    }

    #[test]
    fn the_default_pipeline_runs_to_completion() {
        let mut ctx = Context::new();
        let mut module = void_main_module(&mut ctx);

        let mut out = Vec::new();
        let mut manager = PassManager::new(PassPipelineConfig::default(), &mut out);
        let mut diagnostics = DiagnosticManager::new();
        manager.run(&mut module, &mut ctx, &mut diagnostics).unwrap();

        assert_eq!(module.name(), "main");
        assert!(diagnostics.messages().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn disabled_passes_do_not_run_or_trace() {
        let mut ctx = Context::new();
        let mut module = void_main_module(&mut ctx);
        let main = module.declarations[0];

        let mut config = PassPipelineConfig::default();
        config.disable_pass("void-main");
        // Trace flags on a disabled pass must produce nothing.
        config.print_before("void-main");
        config.print_after("void-main");

        let mut out = Vec::new();
        let mut manager = PassManager::new(config, &mut out);
        manager
            .run(&mut module, &mut ctx, &mut DiagnosticManager::new())
            .unwrap();

        assert!(out.is_empty());

        // The rewrite did not happen.
        let function = ctx.function(main).unwrap();
        let fn_ty = ctx.types.unwrap_to_function_type(function.ty).unwrap();
        let TypeKind::Function { return_type, .. } = ctx.types.kind(fn_ty) else {
            panic!("not a function type");
        };
        assert!(matches!(ctx.types.kind(*return_type), TypeKind::Void));
    }

    #[test]
    fn trace_banners_bracket_the_requested_pass() {
        let mut ctx = Context::new();
        let mut module = void_main_module(&mut ctx);

        let mut config = PassPipelineConfig::default();
        config.print_before("void-main");
        config.print_after("void-main");

        let mut out = Vec::new();
        let mut manager = PassManager::new(config, &mut out).with_stripped_colors();
        manager
            .run(&mut module, &mut ctx, &mut DiagnosticManager::new())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("// GIL before void-main pass").count(), 1);
        assert_eq!(text.matches("// GIL after void-main pass").count(), 1);
        assert_eq!(text.matches("// End GIL before void-main pass").count(), 1);
        // The after listing shows the rewritten signature.
        assert!(text.contains("() -> i32"));
        // No other pass traced anything.
        assert!(!text.contains("dead-code-elimination"));
    }

    #[test]
    fn diagnostics_from_one_pass_never_stop_the_next() {
        let mut ctx = Context::new();
        let mut module = Module::new("main");

        // One block that both loads an uninitialized slot and lacks a
        // terminator, so two different passes have something to report.
        let int = ctx.types.int(true, 32);
        let void = ctx.types.void();
        let ty = ctx.types.function(vec![], void);
        let mut function = Function::new(InternedSymbol::new("f"), ty);
        let entry = function.add_block(None);
        let slot = function.fresh_value();
        let loaded = function.fresh_value();
        let block = function.blocks.get_mut(&entry).unwrap();
        block.instructions.push(Instruction::Alloca {
            destination: slot,
            ty: int,
        });
        block.instructions.push(Instruction::Load {
            destination: loaded,
            source: slot,
        });
        ctx.add_function(&mut module, function).unwrap();

        let mut out = Vec::new();
        let mut manager = PassManager::new(PassPipelineConfig::default(), &mut out);
        let mut diagnostics = DiagnosticManager::new();
        manager.run(&mut module, &mut ctx, &mut diagnostics).unwrap();

        let messages = diagnostics
            .messages()
            .iter()
            .map(|d| d.message.clone())
            .collect::<Vec<_>>();

        assert!(messages
            .iter()
            .any(|m| m.contains("may be used before it is initialized")));
        assert!(messages
            .iter()
            .any(|m| m.contains("does not end with a terminator")));
    }

    #[test]
    fn unknown_pass_names_are_ignored() {
        let mut config = PassPipelineConfig::default();
        config.disable_pass("no-such-pass");
        config.print_before("no-such-pass");

        assert!(config.passes().iter().all(|p| p.enabled));
        assert!(config.passes().iter().all(|p| !p.print_before));
    }

    #[test]
    fn every_registered_pass_appears_once_in_the_default_pipeline() {
        let config = PassPipelineConfig::default();
        let kinds = config.passes().iter().map(|p| p.kind).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                PassKind::VoidMain,
                PassKind::DeadCodeElimination,
                PassKind::DetectUninitialized,
                PassKind::TerminatorCheck,
            ]
        );
    }
}
