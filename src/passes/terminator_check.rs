//! The `terminator-check` pass. Verifies that every basic block ends with
//! exactly one terminator instruction: the last instruction must be a
//! terminator and no terminator may appear earlier in the block. Violations
//! are reported as errors; the blocks are left untouched.

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

        for block in function.blocks.values() {
            let position = block
                .instructions
                .iter()
                .position(Instruction::is_terminator);

            match position {
                None => diagnostics.error(
                    block.span,
                    format!("block {} does not end with a terminator", block.id),
                ),
                Some(index) if index + 1 != block.instructions.len() => diagnostics.error(
                    block.span,
                    format!("block {} has instructions after its terminator", block.id),
                ),
                Some(_) => {}
            }
        }
    }

    Ok(())
}
