//! Exhaustive dispatch over the closed type variant set.
//!
//! A [`TypeVisitor`] declares one handler per variant with no fallback.
//! Dispatch is a pure function of the variant tag, and because every method
//! is required, adding a variant to [`TypeKind`] refuses to compile until
//! every visitor in the tree has a handler for it.

use super::{FieldTy, TypeArena, TypeId, TypeKind};
use crate::intern::InternedSymbol;

pub trait TypeVisitor {
    type Result;

    fn visit_int(&mut self, signed: bool, width: u32) -> Self::Result;

    fn visit_float(&mut self, width: u32) -> Self::Result;

    fn visit_bool(&mut self) -> Self::Result;

    fn visit_char(&mut self) -> Self::Result;

    fn visit_void(&mut self) -> Self::Result;

    fn visit_pointer(&mut self, pointee: TypeId) -> Self::Result;

    fn visit_function(&mut self, parameters: &[TypeId], return_type: TypeId) -> Self::Result;

    fn visit_struct(&mut self, name: InternedSymbol, fields: &[FieldTy]) -> Self::Result;

    fn visit_enum(&mut self, name: InternedSymbol, cases: &[InternedSymbol]) -> Self::Result;
}

impl TypeArena {
    /// Invokes the handler matching the runtime variant of `id`.
    pub fn visit<V: TypeVisitor>(&self, id: TypeId, visitor: &mut V) -> V::Result {
        match self.kind(id) {
            TypeKind::Int { signed, width } => visitor.visit_int(*signed, *width),
            TypeKind::Float { width } => visitor.visit_float(*width),
            TypeKind::Bool => visitor.visit_bool(),
            TypeKind::Char => visitor.visit_char(),
            TypeKind::Void => visitor.visit_void(),
            TypeKind::Pointer { pointee } => visitor.visit_pointer(*pointee),
            TypeKind::Function {
                parameters,
                return_type,
            } => visitor.visit_function(parameters, *return_type),
            TypeKind::Struct { name, fields } => visitor.visit_struct(*name, fields),
            TypeKind::Enum { name, cases } => visitor.visit_enum(*name, cases),
        }
    }
}

/// Renders a type the way Glu source spells it. Used by diagnostics and the
/// GIL printer.
pub struct TypeNamePrinter<'t> {
    types: &'t TypeArena,
}

impl<'t> TypeNamePrinter<'t> {
    pub fn new(types: &'t TypeArena) -> Self {
        Self { types }
    }
}

impl TypeVisitor for TypeNamePrinter<'_> {
    type Result = String;

    fn visit_int(&mut self, signed: bool, width: u32) -> String {
        format!("{}{width}", if signed { "i" } else { "u" })
    }

    fn visit_float(&mut self, width: u32) -> String {
        format!("f{width}")
    }

    fn visit_bool(&mut self) -> String {
        "bool".to_owned()
    }

    fn visit_char(&mut self) -> String {
        "char".to_owned()
    }

    fn visit_void(&mut self) -> String {
        "void".to_owned()
    }

    fn visit_pointer(&mut self, pointee: TypeId) -> String {
        format!("*{}", self.types.visit(pointee, self))
    }

    fn visit_function(&mut self, parameters: &[TypeId], return_type: TypeId) -> String {
        let mut rendered = Vec::new();
        for parameter in parameters {
            rendered.push(self.types.visit(*parameter, self));
        }

        format!(
            "({}) -> {}",
            rendered.join(", "),
            self.types.visit(return_type, self)
        )
    }

    fn visit_struct(&mut self, name: InternedSymbol, _fields: &[FieldTy]) -> String {
        name.value().to_owned()
    }

    fn visit_enum(&mut self, name: InternedSymbol, _cases: &[InternedSymbol]) -> String {
        name.value().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::TypeVisitor;
    use crate::{
        intern::InternedSymbol,
        types::{FieldTy, TypeArena, TypeId, TypeKind},
    };

    /// Reports which handler fired, proving dispatch is driven purely by the
    /// variant tag.
    struct TagRecorder;

    impl TypeVisitor for TagRecorder {
        type Result = &'static str;

        fn visit_int(&mut self, _signed: bool, _width: u32) -> &'static str {
            "int"
        }

        fn visit_float(&mut self, _width: u32) -> &'static str {
            "float"
        }

        fn visit_bool(&mut self) -> &'static str {
            "bool"
        }

        fn visit_char(&mut self) -> &'static str {
            "char"
        }

        fn visit_void(&mut self) -> &'static str {
            "void"
        }

        fn visit_pointer(&mut self, _pointee: TypeId) -> &'static str {
            "pointer"
        }

        fn visit_function(&mut self, _parameters: &[TypeId], _return_type: TypeId) -> &'static str {
            "function"
        }

        fn visit_struct(&mut self, _name: InternedSymbol, _fields: &[FieldTy]) -> &'static str {
            "struct"
        }

        fn visit_enum(&mut self, _name: InternedSymbol, _cases: &[InternedSymbol]) -> &'static str {
            "enum"
        }
    }

    #[test]
    fn each_variant_dispatches_to_its_own_handler() {
        let mut types = TypeArena::new();

        let int = types.int(true, 32);
        let float = types.float(64);
        let boolean = types.bool();
        let character = types.char();
        let void = types.void();
        let pointer = types.pointer(int);
        let function = types.function(vec![int], void);
        let structure = types.intern(TypeKind::Struct {
            name: InternedSymbol::new("Point"),
            fields: vec![FieldTy {
                name: InternedSymbol::new("x"),
                ty: int,
            }],
        });
        let enumeration = types.intern(TypeKind::Enum {
            name: InternedSymbol::new("Direction"),
            cases: vec![InternedSymbol::new("North"), InternedSymbol::new("South")],
        });

        let mut recorder = TagRecorder;

        assert_eq!(types.visit(int, &mut recorder), "int");
        assert_eq!(types.visit(float, &mut recorder), "float");
        assert_eq!(types.visit(boolean, &mut recorder), "bool");
        assert_eq!(types.visit(character, &mut recorder), "char");
        assert_eq!(types.visit(void, &mut recorder), "void");
        assert_eq!(types.visit(pointer, &mut recorder), "pointer");
        assert_eq!(types.visit(function, &mut recorder), "function");
        assert_eq!(types.visit(structure, &mut recorder), "struct");
        assert_eq!(types.visit(enumeration, &mut recorder), "enum");
    }

    #[test]
    fn type_names_render_recursively() {
        let mut types = TypeArena::new();

        let int = types.int(true, 32);
        let boolean = types.bool();
        let function = types.function(vec![int, boolean], int);
        let pointer = types.pointer(function);

        assert_eq!(types.name_of(int), "i32");
        assert_eq!(types.name_of(pointer), "*(i32, bool) -> i32");
    }
}
