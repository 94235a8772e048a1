//! Human-readable rendering of GIL modules, used by pass tracing and for
//! debugging. Output is colored for terminals; callers writing to files
//! strip the escape codes (see the pass manager).

use colored::Colorize;
use itertools::Itertools;

use super::{Declaration, Function, Global, Instruction, Module};
use crate::{context::Context, types::TypeArena};

pub fn render_module(module: &Module, ctx: &Context) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} {} {}\n",
        "gil".magenta(),
        "module".magenta(),
        format!("\"{}\"", module.name()).green(),
        "{".white()
    ));

    for decl_id in &module.declarations {
        match ctx.decls.get(*decl_id) {
            Some(Declaration::Function(function)) => {
                out.push_str(&render_function(function, &ctx.types));
            }
            Some(Declaration::Global(global)) => {
                out.push_str(&render_global(global, &ctx.types));
            }
            // Released declarations simply no longer print.
            None => {}
        }
    }

    out.push_str(&format!("{}\n", "}".white()));
    out
}

fn render_function(function: &Function, types: &TypeArena) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} : {} {}\n",
        "fn".magenta(),
        format!("@{}", function.name.value()).blue(),
        types.name_of(function.ty).yellow(),
        "{".white()
    ));

    for block in function.blocks.values() {
        out.push_str(&format!("{}\n", format!("{}:", block.id).bright_red()));

        for instruction in &block.instructions {
            out.push_str(&format!("    {}\n", render_instruction(instruction, types)));
        }
    }

    out.push_str(&format!("{}\n", "}".white()));
    out
}

fn render_global(global: &Global, types: &TypeArena) -> String {
    let name = format!("@{}", global.name.value()).blue();
    let ty = types.name_of(global.ty).yellow();

    match global.initializer {
        Some(value) => format!(
            "{} {name} : {ty} = {}\n",
            "global".magenta(),
            value.to_string().purple()
        ),
        None => format!("{} {name} : {ty}\n", "global".magenta()),
    }
}

fn render_instruction(instruction: &Instruction, types: &TypeArena) -> String {
    match instruction {
        Instruction::IntegerLiteral {
            destination,
            ty,
            value,
        } => format!(
            "{destination} {} {} ${}, {}",
            "=".white(),
            "integer_literal".cyan(),
            types.name_of(*ty).yellow(),
            value.to_string().purple()
        ),
        Instruction::Alloca { destination, ty } => format!(
            "{destination} {} {} ${}",
            "=".white(),
            "alloca".cyan(),
            types.name_of(*ty).yellow()
        ),
        Instruction::Load {
            destination,
            source,
        } => format!("{destination} {} {} {source}", "=".white(), "load".cyan()),
        Instruction::Store {
            source,
            destination,
        } => format!(
            "{} {source} {} {destination}",
            "store".cyan(),
            "->".white()
        ),
        Instruction::Call {
            destination,
            callee,
            arguments,
        } => {
            let arguments = arguments.iter().map(|a| a.to_string()).join(", ");
            let call = format!(
                "{} {}({arguments})",
                "call".cyan(),
                format!("@{}", callee.value()).blue()
            );

            match destination {
                Some(destination) => format!("{destination} {} {call}", "=".white()),
                None => call,
            }
        }
        Instruction::Br { destination } => format!(
            "{} {}",
            "br".cyan(),
            destination.to_string().bright_red()
        ),
        Instruction::CondBr {
            condition,
            then_block,
            else_block,
        } => format!(
            "{} {condition}, {}, {}",
            "cond_br".cyan(),
            then_block.to_string().bright_red(),
            else_block.to_string().bright_red()
        ),
        Instruction::Return { value } => match value {
            Some(value) => format!("{} {value}", "return".cyan()),
            None => "return".cyan().to_string(),
        },
        Instruction::Unreachable => "unreachable".cyan().to_string(),
    }
}
