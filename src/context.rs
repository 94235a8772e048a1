//! Per-translation-unit ownership context.

use crate::{
    arena::{AllocationError, Arena},
    ast::Ast,
    gil::{DeclId, Declaration, Function, Global, Module},
    types::TypeArena,
};

/// Owns every node created while compiling one translation unit: the AST
/// graph, the uniqued types, and the GIL declaration payloads. Dropping the
/// context tears all of them down in bulk. One context per unit; compiling
/// units in parallel means one context each.
#[derive(Debug, Default)]
pub struct Context {
    pub ast: Ast,
    pub types: TypeArena,
    pub decls: Arena<DeclId, Declaration>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a function declaration and appends it to the module's
    /// ordered declaration sequence.
    pub fn add_function(
        &mut self,
        module: &mut Module,
        function: Function,
    ) -> Result<DeclId, AllocationError> {
        let id = self.decls.allocate(Declaration::Function(function))?;
        module.add_declaration(id);
        Ok(id)
    }

    /// Allocates a global declaration and appends it to the module's ordered
    /// declaration sequence.
    pub fn add_global(
        &mut self,
        module: &mut Module,
        global: Global,
    ) -> Result<DeclId, AllocationError> {
        let id = self.decls.allocate(Declaration::Global(global))?;
        module.add_declaration(id);
        Ok(id)
    }

    pub fn function(&self, id: DeclId) -> Option<&Function> {
        self.decls.get(id).and_then(Declaration::as_function)
    }

    pub fn function_mut(&mut self, id: DeclId) -> Option<&mut Function> {
        self.decls.get_mut(id).and_then(Declaration::as_function_mut)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Context;
    use crate::{
        gil::{Function, Module},
        intern::InternedSymbol,
    };

    #[test]
    fn declarations_are_appended_in_order() {
        let mut ctx = Context::new();
        let mut module = Module::new("main");

        let void = ctx.types.void();
        let ty = ctx.types.function(vec![], void);
        let a = ctx
            .add_function(&mut module, Function::new(InternedSymbol::new("a"), ty))
            .unwrap();
        let b = ctx
            .add_function(&mut module, Function::new(InternedSymbol::new("b"), ty))
            .unwrap();

        assert_eq!(module.declarations, vec![a, b]);
        assert_eq!(ctx.function(a).unwrap().name.value(), "a");
    }
}
