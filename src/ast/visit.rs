//! Read-only traversal of the AST in source order.
//!
//! The default trait methods delegate to the `walk_*` free functions, so an
//! implementation only overrides the hooks it cares about and keeps the rest
//! of the traversal for free.

use super::{Ast, Category, NodeId};

pub trait Visitor: Sized {
    fn visit_node(&mut self, ast: &Ast, id: NodeId) {
        walk_node(self, ast, id)
    }

    fn visit_declaration(&mut self, ast: &Ast, id: NodeId) {
        walk_children(self, ast, id)
    }

    fn visit_statement(&mut self, ast: &Ast, id: NodeId) {
        walk_children(self, ast, id)
    }

    fn visit_expression(&mut self, ast: &Ast, id: NodeId) {
        walk_children(self, ast, id)
    }
}

pub fn walk_node(visitor: &mut impl Visitor, ast: &Ast, id: NodeId) {
    let Some(node) = ast.get(id) else {
        return;
    };

    match node.kind.category() {
        Category::Declaration => visitor.visit_declaration(ast, id),
        Category::Statement => visitor.visit_statement(ast, id),
        Category::Expression => visitor.visit_expression(ast, id),
    }
}

pub fn walk_children(visitor: &mut impl Visitor, ast: &Ast, id: NodeId) {
    for child in ast.children(id) {
        visitor.visit_node(ast, child);
    }
}
