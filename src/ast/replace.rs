//! Structural rewriting of the AST.
//!
//! [`replace_child`] is the single primitive every higher-level tree rewrite
//! (lowering, constant folding, implicit-conversion insertion) is built on.
//! It never allocates; it repoints exactly one existing child slot.

use super::{Ast, Category, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    /// The claimed child is not currently held by any child slot of the
    /// claimed parent. Silently ignoring this would leave the tree invariants
    /// corrupted, so it is a hard error.
    #[error("node {node:?} is not a child of node {parent:?}")]
    NotAChild { parent: NodeId, node: NodeId },

    /// The replacement belongs to a different grammar category than the node
    /// it would replace, so it cannot occupy the same slot.
    #[error("replacement node {new:?} is {found:?} but the slot holds {expected:?}")]
    CategoryMismatch {
        new: NodeId,
        expected: Category,
        found: Category,
    },

    /// An id that does not refer to a live node.
    #[error("node {0:?} is released or out of range")]
    DeadNode(NodeId),
}

/// Repoints the child slot of `parent` currently holding `old` to `new`,
/// makes `parent` the parent of `new`, and clears the parent back-reference
/// of `old`. The orphaned `old` stays arena-owned and valid, it is simply no
/// longer part of the tree.
///
/// On any error the tree is left completely unmodified.
pub fn replace_child(
    ast: &mut Ast,
    parent: NodeId,
    old: NodeId,
    new: NodeId,
) -> Result<(), StructuralError> {
    let parent_node = ast
        .get(parent)
        .ok_or(StructuralError::DeadNode(parent))?;

    if !parent_node.kind.children().contains(&old) {
        return Err(StructuralError::NotAChild { parent, node: old });
    }

    let expected = ast
        .get(old)
        .ok_or(StructuralError::DeadNode(old))?
        .kind
        .category();
    let found = ast
        .get(new)
        .ok_or(StructuralError::DeadNode(new))?
        .kind
        .category();

    if expected != found {
        return Err(StructuralError::CategoryMismatch {
            new,
            expected,
            found,
        });
    }

    // The checks above guarantee a slot holding `old` exists; repoint the
    // first one only.
    if let Some(node) = ast.get_mut(parent) {
        for slot in node.kind.child_slots_mut() {
            if *slot == old {
                *slot = new;
                break;
            }
        }
    }

    if let Some(node) = ast.get_mut(old) {
        node.parent = None;
    }
    if let Some(node) = ast.get_mut(new) {
        node.parent = Some(parent);
    }

    Ok(())
}
