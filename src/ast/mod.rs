//! The abstract syntax tree produced by the (external) front-end.
//!
//! Nodes live in an [`Arena`] and refer to each other through [`NodeId`]
//! indices. The parent holds the owning reference to each child inside its
//! [`NodeKind`]; the child's `parent` field is a non-owning back-reference
//! only, so the tree can be traversed in both directions without any
//! double-ownership. At every point observable between mutations, the child
//! ids reachable from the root agree with the parent pointers of every
//! non-root node.

use crate::{
    arena::{AllocationError, Arena},
    index::simple_index,
    intern::InternedSymbol,
    source::Span,
    types::TypeId,
};

pub mod replace;
pub mod visit;

pub use replace::{StructuralError, replace_child};

simple_index! {
    /// Identifies an AST node within its arena
    pub struct NodeId;
}

#[derive(Debug)]
pub struct Node {
    /// Back-reference to the node owning this one. `None` for the root and
    /// for orphans detached by rewriting.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    pub span: Span,
}

/// Coarse classification of a node, mirroring the declaration/statement/
/// expression split of the grammar. Structural rewrites may only exchange
/// nodes within the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Declaration,
    Statement,
    Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Not,
    Dereference,
    AddressOf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Char(char),
    Int(i64),
    Float(f64),
    String(InternedSymbol),
}

#[derive(Debug)]
pub enum NodeKind {
    /* Declarations */
    /// The root of a translation unit
    Module {
        name: InternedSymbol,
        declarations: Vec<NodeId>,
    },
    Function {
        name: InternedSymbol,
        ty: TypeId,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
    },
    Param {
        name: InternedSymbol,
        ty: TypeId,
    },
    Let {
        name: InternedSymbol,
        ty: Option<TypeId>,
        value: NodeId,
    },
    Var {
        name: InternedSymbol,
        ty: Option<TypeId>,
        value: Option<NodeId>,
    },
    Struct {
        name: InternedSymbol,
        ty: TypeId,
    },
    Enum {
        name: InternedSymbol,
        ty: TypeId,
    },

    /* Statements */
    Compound {
        statements: Vec<NodeId>,
    },
    Expression {
        expression: NodeId,
    },
    Return {
        value: Option<NodeId>,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    Assign {
        target: NodeId,
        value: NodeId,
    },

    /* Expressions */
    Literal(Literal),
    Ref {
        name: InternedSymbol,
    },
    Binary {
        lhs: NodeId,
        operator: BinaryOperator,
        rhs: NodeId,
    },
    Unary {
        operator: UnaryOperator,
        operand: NodeId,
    },
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Cast {
        value: NodeId,
        ty: TypeId,
    },
}

impl NodeKind {
    pub fn category(&self) -> Category {
        match self {
            NodeKind::Module { .. }
            | NodeKind::Function { .. }
            | NodeKind::Param { .. }
            | NodeKind::Let { .. }
            | NodeKind::Var { .. }
            | NodeKind::Struct { .. }
            | NodeKind::Enum { .. } => Category::Declaration,
            NodeKind::Compound { .. }
            | NodeKind::Expression { .. }
            | NodeKind::Return { .. }
            | NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::Assign { .. } => Category::Statement,
            NodeKind::Literal(_)
            | NodeKind::Ref { .. }
            | NodeKind::Binary { .. }
            | NodeKind::Unary { .. }
            | NodeKind::Call { .. }
            | NodeKind::Cast { .. } => Category::Expression,
        }
    }

    /// The owned child ids of this node, in slot order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut children = Vec::new();

        match self {
            NodeKind::Module { declarations, .. } => children.extend(declarations),
            NodeKind::Function {
                parameters, body, ..
            } => {
                children.extend(parameters);
                children.extend(body);
            }
            NodeKind::Param { .. } => {}
            NodeKind::Let { value, .. } => children.push(*value),
            NodeKind::Var { value, .. } => children.extend(value),
            NodeKind::Struct { .. } | NodeKind::Enum { .. } => {}
            NodeKind::Compound { statements } => children.extend(statements),
            NodeKind::Expression { expression } => children.push(*expression),
            NodeKind::Return { value } => children.extend(value),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                children.push(*condition);
                children.push(*then_branch);
                children.extend(else_branch);
            }
            NodeKind::While { condition, body } => {
                children.push(*condition);
                children.push(*body);
            }
            NodeKind::Assign { target, value } => {
                children.push(*target);
                children.push(*value);
            }
            NodeKind::Literal(_) | NodeKind::Ref { .. } => {}
            NodeKind::Binary { lhs, rhs, .. } => {
                children.push(*lhs);
                children.push(*rhs);
            }
            NodeKind::Unary { operand, .. } => children.push(*operand),
            NodeKind::Call { callee, arguments } => {
                children.push(*callee);
                children.extend(arguments);
            }
            NodeKind::Cast { value, .. } => children.push(*value),
        }

        children
    }

    /// Mutable references to every owned child slot, in slot order. Used by
    /// structural rewriting to repoint a single slot in place.
    pub(crate) fn child_slots_mut(&mut self) -> Vec<&mut NodeId> {
        let mut slots = Vec::new();

        match self {
            NodeKind::Module { declarations, .. } => slots.extend(declarations.iter_mut()),
            NodeKind::Function {
                parameters, body, ..
            } => {
                slots.extend(parameters.iter_mut());
                slots.extend(body.iter_mut());
            }
            NodeKind::Param { .. } => {}
            NodeKind::Let { value, .. } => slots.push(value),
            NodeKind::Var { value, .. } => slots.extend(value.iter_mut()),
            NodeKind::Struct { .. } | NodeKind::Enum { .. } => {}
            NodeKind::Compound { statements } => slots.extend(statements.iter_mut()),
            NodeKind::Expression { expression } => slots.push(expression),
            NodeKind::Return { value } => slots.extend(value.iter_mut()),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                slots.push(condition);
                slots.push(then_branch);
                slots.extend(else_branch.iter_mut());
            }
            NodeKind::While { condition, body } => {
                slots.push(condition);
                slots.push(body);
            }
            NodeKind::Assign { target, value } => {
                slots.push(target);
                slots.push(value);
            }
            NodeKind::Literal(_) | NodeKind::Ref { .. } => {}
            NodeKind::Binary { lhs, rhs, .. } => {
                slots.push(lhs);
                slots.push(rhs);
            }
            NodeKind::Unary { operand, .. } => slots.push(operand),
            NodeKind::Call { callee, arguments } => {
                slots.push(callee);
                slots.extend(arguments.iter_mut());
            }
            NodeKind::Cast { value, .. } => slots.push(value),
        }

        slots
    }
}

/// The node graph of one translation unit.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Arena<NodeId, Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node and wires the parent back-reference of every child
    /// id referenced by `kind` to the new node, so the tree is consistent as
    /// soon as the id is handed back.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, AllocationError> {
        let children = kind.children();
        let id = self.nodes.allocate(Node {
            parent: None,
            kind,
            span,
        })?;

        for child in children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(id);
            }
        }

        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Panics if `id` was released or never allocated here. Use [`Ast::get`]
    /// when that is a reachable state.
    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id).expect("AST node id out of range or released")
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|node| node.kind.children()).unwrap_or_default()
    }

    /// Runs the destructor of a node without reclaiming its arena slot. The
    /// node must already be detached from the tree.
    pub fn release(&mut self, id: NodeId) -> bool {
        self.nodes.release(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Ast, Category, Literal, NodeKind};
    use crate::{intern::InternedSymbol, source::Span};

    #[test]
    fn alloc_wires_parent_back_references() {
        let mut ast = Ast::new();

        let value = ast
            .alloc(NodeKind::Literal(Literal::Int(1)), Span::new(4, 5))
            .unwrap();
        let let_decl = ast
            .alloc(
                NodeKind::Let {
                    name: InternedSymbol::new("x"),
                    ty: None,
                    value,
                },
                Span::new(0, 5),
            )
            .unwrap();

        assert_eq!(ast.parent(value), Some(let_decl));
        assert_eq!(ast.parent(let_decl), None);
        assert_eq!(ast.children(let_decl), vec![value]);
    }

    #[test]
    fn categories_follow_the_grammar_split() {
        let mut ast = Ast::new();

        let lit = ast
            .alloc(NodeKind::Literal(Literal::Bool(true)), Span::SYNTHESIZED)
            .unwrap();
        let stmt = ast
            .alloc(NodeKind::Return { value: Some(lit) }, Span::SYNTHESIZED)
            .unwrap();
        let decl = ast
            .alloc(
                NodeKind::Module {
                    name: InternedSymbol::new("main"),
                    declarations: vec![],
                },
                Span::SYNTHESIZED,
            )
            .unwrap();

        assert_eq!(ast.node(lit).kind.category(), Category::Expression);
        assert_eq!(ast.node(stmt).kind.category(), Category::Statement);
        assert_eq!(ast.node(decl).kind.category(), Category::Declaration);
    }

    #[test]
    fn children_are_reported_in_slot_order() {
        let mut ast = Ast::new();

        let condition = ast
            .alloc(NodeKind::Literal(Literal::Bool(true)), Span::SYNTHESIZED)
            .unwrap();
        let then_branch = ast
            .alloc(NodeKind::Compound { statements: vec![] }, Span::SYNTHESIZED)
            .unwrap();
        let else_branch = ast
            .alloc(NodeKind::Compound { statements: vec![] }, Span::SYNTHESIZED)
            .unwrap();
        let if_stmt = ast
            .alloc(
                NodeKind::If {
                    condition,
                    then_branch,
                    else_branch: Some(else_branch),
                },
                Span::SYNTHESIZED,
            )
            .unwrap();

        assert_eq!(
            ast.children(if_stmt),
            vec![condition, then_branch, else_branch]
        );
    }
}
