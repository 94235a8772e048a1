//! The `detect-uninitialized` pass. Flags loads from a stack slot that no
//! store has written to yet.
//!
//! The analysis is a single forward scan over the blocks of each function in
//! block-id order; a slot counts as initialized once any store to it has been
//! seen. That is deliberately conservative about control flow: a store on one
//! branch initializes the slot for everything scanned afterwards. It still
//! catches the common case of a variable declared and read before any
//! assignment.

use hashbrown::HashSet;

use super::PassError;
use crate::{
    context::Context,
    diagnostics::DiagnosticManager,
    gil::{Instruction, Module},
};

pub(super) fn run(
    module: &mut Module,
    ctx: &mut Context,
    diagnostics: &mut DiagnosticManager,
) -> Result<(), PassError> {
    for decl_id in &module.declarations {
        let Some(function) = ctx.function(*decl_id) else {
            continue;
        };

        let mut allocas = HashSet::new();
        let mut initialized = HashSet::new();

        for block in function.blocks.values() {
            for instruction in &block.instructions {
                match instruction {
                    Instruction::Alloca { destination, .. } => {
                        allocas.insert(*destination);
                    }
                    Instruction::Store { destination, .. } => {
                        initialized.insert(*destination);
                    }
                    Instruction::Load { source, .. } => {
                        if allocas.contains(source) && !initialized.contains(source) {
                            diagnostics.error(
                                block.span,
                                format!("variable {source} may be used before it is initialized"),
                            );
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
