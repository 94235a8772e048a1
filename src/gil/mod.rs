//! GIL (Glu Intermediate Language). The representation every optimization
//! and checking pass operates on: a module of declarations, functions made of
//! basic blocks, and a small closed instruction set where control flow is
//! explicit branches between blocks.

use std::collections::BTreeMap;

use crate::{
    index::{Index, simple_index},
    intern::InternedSymbol,
    source::Span,
    types::TypeId,
};

pub mod printer;

simple_index! {
    /// Identifies a GIL declaration within the declaration arena
    pub struct DeclId;
}

simple_index! {
    /// Identifies a basic block within a function
    pub struct BlockId;
}

simple_index! {
    /// A virtual value produced by an instruction, local to its function
    pub struct ValueId;
}

impl BlockId {
    pub const ZERO: Self = Self(0);
}

impl core::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bb{}", self.index())
    }
}

impl core::fmt::Display for ValueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.index())
    }
}

/// A translation unit in GIL form. The module owns the *order* of its
/// declarations only; the declaration payloads are arena-owned (see
/// [`crate::context::Context`]), so tearing down the arena tears down the
/// module's contents.
#[derive(Debug)]
pub struct Module {
    name: String,
    pub declarations: Vec<DeclId>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// The import name this module was constructed with, verbatim.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_declaration(&mut self, id: DeclId) {
        self.declarations.push(id);
    }

    /// Removes a declaration from the ordered sequence. The payload stays
    /// arena-owned; this only detaches it from the module.
    pub fn remove_declaration(&mut self, id: DeclId) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|d| *d != id);
        before != self.declarations.len()
    }
}

#[derive(Debug)]
pub enum Declaration {
    Function(Function),
    Global(Global),
}

impl Declaration {
    pub fn name(&self) -> InternedSymbol {
        match self {
            Declaration::Function(function) => function.name,
            Declaration::Global(global) => global.name,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Declaration::Function(function) => Some(function),
            Declaration::Global(_) => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut Function> {
        match self {
            Declaration::Function(function) => Some(function),
            Declaration::Global(_) => None,
        }
    }
}

/// A module-level variable
#[derive(Debug)]
pub struct Global {
    pub name: InternedSymbol,
    pub ty: TypeId,
    pub initializer: Option<i64>,
}

#[derive(Debug)]
pub struct Function {
    pub name: InternedSymbol,
    /// Always a function type (or pointer to one, for lifted thunks)
    pub ty: TypeId,
    /// Blocks in id order; the entry block is the lowest id
    pub blocks: BTreeMap<BlockId, BasicBlock>,
    next_value: ValueId,
}

impl Function {
    pub fn new(name: InternedSymbol, ty: TypeId) -> Self {
        Self {
            name,
            ty,
            blocks: BTreeMap::new(),
            next_value: ValueId::new(0),
        }
    }

    /// Appends an empty block with the next free id.
    pub fn add_block(&mut self, span: Option<Span>) -> BlockId {
        let id = self
            .blocks
            .keys()
            .next_back()
            .map(|last| last.plus(1))
            .unwrap_or(BlockId::ZERO);

        self.blocks.insert(
            id,
            BasicBlock {
                id,
                instructions: Vec::new(),
                span,
            },
        );

        id
    }

    pub fn entry_block(&self) -> Option<BlockId> {
        self.blocks.keys().next().copied()
    }

    /// Reserves a fresh virtual value id for a new instruction result.
    pub fn fresh_value(&mut self) -> ValueId {
        let value = self.next_value;
        self.next_value.increment_by(1);
        value
    }
}

#[derive(Debug)]
pub struct BasicBlock {
    pub id: BlockId,
    pub instructions: Vec<Instruction>,
    /// Source range this block was lowered from, when known
    pub span: Option<Span>,
}

impl BasicBlock {
    /// The block's final instruction, if it is a terminator.
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instructions.last().filter(|i| i.is_terminator())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    IntegerLiteral {
        destination: ValueId,
        ty: TypeId,
        value: i64,
    },
    /// Reserves a stack slot for a local variable
    Alloca {
        destination: ValueId,
        ty: TypeId,
    },
    Load {
        destination: ValueId,
        source: ValueId,
    },
    Store {
        source: ValueId,
        destination: ValueId,
    },
    Call {
        destination: Option<ValueId>,
        callee: InternedSymbol,
        arguments: Vec<ValueId>,
    },
    Br {
        destination: BlockId,
    },
    CondBr {
        condition: ValueId,
        then_block: BlockId,
        else_block: BlockId,
    },
    Return {
        value: Option<ValueId>,
    },
    Unreachable,
}

impl Instruction {
    /// Terminators end a basic block; everything after one can never run.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Br { .. }
                | Instruction::CondBr { .. }
                | Instruction::Return { .. }
                | Instruction::Unreachable
        )
    }

    /// The blocks this instruction may transfer control to.
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Instruction::Br { destination } => vec![*destination],
            Instruction::CondBr {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{BlockId, Function, Instruction, Module, ValueId};
    use crate::{index::Index, intern::InternedSymbol, types::TypeArena};

    #[test]
    fn module_name_is_exposed_verbatim() {
        let module = Module::new("main");

        assert_eq!(module.name(), "main");
    }

    #[test]
    fn blocks_are_appended_with_sequential_ids() {
        let mut types = TypeArena::new();
        let void = types.void();
        let ty = types.function(vec![], void);
        let mut function = Function::new(InternedSymbol::new("f"), ty);

        let a = function.add_block(None);
        let b = function.add_block(None);

        assert_eq!(a, BlockId::ZERO);
        assert_eq!(b, BlockId::new(1));
        assert_eq!(function.entry_block(), Some(a));
    }

    #[test]
    fn terminator_classification() {
        assert!(Instruction::Return { value: None }.is_terminator());
        assert!(Instruction::Unreachable.is_terminator());
        assert!(
            !Instruction::Load {
                destination: ValueId::new(0),
                source: ValueId::new(1),
            }
            .is_terminator()
        );
    }

    #[test]
    fn successors_follow_branches_only() {
        let br = Instruction::Br {
            destination: BlockId::ZERO,
        };

        assert_eq!(br.successors(), vec![BlockId::ZERO]);
        assert_eq!(Instruction::Unreachable.successors(), vec![]);
    }
}
