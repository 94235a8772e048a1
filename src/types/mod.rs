//! The Glu type representation.
//!
//! Types are a closed set of variants, interned in a [`TypeArena`] so that
//! structurally equal types share a single [`TypeId`]. Identity comparison is
//! therefore id equality. Once interned a type is immutable and lives as long
//! as the arena; inner ids always refer to previously interned types in the
//! same arena.

use hashbrown::HashMap;

use crate::{
    index::{IndexVec, simple_index},
    intern::InternedSymbol,
};

pub mod visit;

simple_index! {
    /// A handle to an interned type
    pub struct TypeId;
}

/// A named field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldTy {
    pub name: InternedSymbol,
    pub ty: TypeId,
}

/// The closed set of Glu type variants. Adding a variant here requires
/// updating every [`visit::TypeVisitor`] implementation, which is the point:
/// no operation over types may silently ignore a kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// i8, i32, u64, etc.
    Int { signed: bool, width: u32 },
    /// f32, f64
    Float { width: u32 },
    /// true, false
    Bool,
    /// 'a', '\n'
    Char,
    /// The absence of a value (function return position only)
    Void,
    /// *T
    Pointer { pointee: TypeId },
    /// (T1, T2) -> T3
    Function {
        parameters: Vec<TypeId>,
        return_type: TypeId,
    },
    /// A nominal struct with ordered, named fields
    Struct {
        name: InternedSymbol,
        fields: Vec<FieldTy>,
    },
    /// A nominal enum with named cases
    Enum {
        name: InternedSymbol,
        cases: Vec<InternedSymbol>,
    },
}

/// Uniquing table owning every type created for one compilation unit.
#[derive(Debug, Default)]
pub struct TypeArena {
    kinds: IndexVec<TypeId, TypeKind>,
    interned: HashMap<TypeKind, TypeId>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a type kind, returning the id of the existing entry if a
    /// structurally equal type was interned before.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(id) = self.interned.get(&kind) {
            return *id;
        }

        let id = self.kinds.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.kinds[id]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /* Shorthands for the commonly requested types */

    pub fn int(&mut self, signed: bool, width: u32) -> TypeId {
        self.intern(TypeKind::Int { signed, width })
    }

    pub fn float(&mut self, width: u32) -> TypeId {
        self.intern(TypeKind::Float { width })
    }

    pub fn bool(&mut self) -> TypeId {
        self.intern(TypeKind::Bool)
    }

    pub fn char(&mut self) -> TypeId {
        self.intern(TypeKind::Char)
    }

    pub fn void(&mut self) -> TypeId {
        self.intern(TypeKind::Void)
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.intern(TypeKind::Pointer { pointee })
    }

    pub fn function(&mut self, parameters: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.intern(TypeKind::Function {
            parameters,
            return_type,
        })
    }

    /// Returns the underlying function type if `id` is a function type or a
    /// pointer to a function type. Exactly one level of indirection is
    /// unwrapped: a pointer to a pointer to a function is *not* a callable
    /// shape.
    pub fn unwrap_to_function_type(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Function { .. } => Some(id),
            TypeKind::Pointer { pointee } => match self.kind(*pointee) {
                TypeKind::Function { .. } => Some(*pointee),
                _ => None,
            },
            _ => None,
        }
    }

    /// Renders a type the way source code would spell it, for diagnostics and
    /// the GIL printer.
    pub fn name_of(&self, id: TypeId) -> String {
        self.visit(id, &mut visit::TypeNamePrinter::new(self))
    }
}
