//! The middle layer of the Glu compiler: arena-owned ASTs, a uniqued type
//! system, the GIL intermediate representation, and the ordered pass pipeline
//! that transforms and checks GIL modules.
//!
//! A front end parses source into an [`ast::Ast`] held by a per-unit
//! [`context::Context`], lowers it to a [`gil::Module`], then hands the
//! module to a [`passes::PassManager`] configured from
//! [`passes::PassManagerOptions`]. Problems found along the way accumulate in
//! a [`diagnostics::DiagnosticManager`]; the driver decides what to do with
//! them once the pipeline has finished.

pub mod arena;
pub mod ast;
pub mod context;
pub mod diagnostics;
pub mod gil;
pub mod index;
pub mod intern;
pub mod passes;
pub mod source;
pub mod types;
