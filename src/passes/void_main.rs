//! The `void-main` pass. Glu lets `main` be declared without a return type,
//! but the C runtime expects an exit status, so a `main` returning void is
//! rewritten to return a signed 32-bit zero instead. Other functions are
//! left alone.

use super::PassError;
use crate::{
    context::Context,
    diagnostics::DiagnosticManager,
    gil::{Instruction, Module},
    types::TypeKind,
};

pub(super) fn run(
    module: &mut Module,
    ctx: &mut Context,
    _diagnostics: &mut DiagnosticManager,
) -> Result<(), PassError> {
    for decl_id in module.declarations.clone() {
        let Some(function) = ctx.function(decl_id) else {
            continue;
        };

        if function.name.value() != "main" {
            continue;
        }

        let Some(fn_ty) = ctx.types.unwrap_to_function_type(function.ty) else {
            continue;
        };
        let TypeKind::Function {
            parameters,
            return_type,
        } = ctx.types.kind(fn_ty).clone()
        else {
            continue;
        };

        if !matches!(ctx.types.kind(return_type), TypeKind::Void) {
            continue;
        }

        // New signature through the same uniquing arena.
        let int = ctx.types.int(true, 32);
        let new_ty = ctx.types.function(parameters, int);

        let Some(function) = ctx.function_mut(decl_id) else {
            continue;
        };
        function.ty = new_ty;

        // Replace every bare `return` with `return 0`.
        let block_ids = function.blocks.keys().copied().collect::<Vec<_>>();
        for block_id in block_ids {
            loop {
                let Some(index) = function.blocks[&block_id]
                    .instructions
                    .iter()
                    .position(|i| matches!(i, Instruction::Return { value: None }))
                else {
                    break;
                };

                let destination = function.fresh_value();
                let block = function
                    .blocks
                    .get_mut(&block_id)
                    .expect("block id was just enumerated");
                block.instructions.splice(
                    index..=index,
                    [
                        Instruction::IntegerLiteral {
                            destination,
                            ty: int,
                            value: 0,
                        },
                        Instruction::Return {
                            value: Some(destination),
                        },
                    ],
                );
            }
        }
    }

    Ok(())
}
