//! The `dead-code-elimination` pass. Removes basic blocks that can never be
//! reached from the function's entry block (blocks nothing branches to), and
//! warns about the code being removed so the programmer can delete it at the
//! source level.

use hashbrown::HashSet;

use super::PassError;
use crate::{context::Context, diagnostics::DiagnosticManager, gil::Module};

pub(super) fn run(
    module: &mut Module,
    ctx: &mut Context,
    diagnostics: &mut DiagnosticManager,
) -> Result<(), PassError> {
    for decl_id in &module.declarations {
        let Some(function) = ctx.function_mut(*decl_id) else {
            continue;
        };
        let Some(entry) = function.entry_block() else {
            continue;
        };

        /* Depth-first reachability over the branch targets */

        let mut reachable = HashSet::new();
        let mut worklist = vec![entry];

        while let Some(block_id) = worklist.pop() {
            if !reachable.insert(block_id) {
                continue;
            }

            let Some(block) = function.blocks.get(&block_id) else {
                continue;
            };

            if let Some(terminator) = block.terminator() {
                worklist.extend(terminator.successors());
            }
        }

        /* Remove everything that was never reached */

        let unreachable = function
            .blocks
            .keys()
            .copied()
            .filter(|id| !reachable.contains(id))
            .collect::<Vec<_>>();

        for block_id in unreachable {
            let Some(block) = function.blocks.remove(&block_id) else {
                continue;
            };

            if !block.instructions.is_empty() {
                diagnostics.warning(block.span, "unreachable code will never be executed");
            }
        }
    }

    Ok(())
}
