//! CEP pattern-sequence engine: query types, compiler facade, and the
//! one-shot operator.

pub mod ast;
mod context;
mod operator;

pub use ast::Ast;
pub use context::{ConfigError, Context, Query};
pub use operator::Operator;

pub use cep_compiler::CompileError;
pub use cep_core::{Attrs, Event, Expr, Value};
pub use cep_vm::{Executor, Match, SkipStrategy};

use std::rc::Rc;

/// Compile a query into a ready-to-run executor.
pub fn compile(query: Query) -> Result<Executor, CompileError> {
    let dst = cep_compiler::compile(&query.patseq, &query.context.schema)?;
    Ok(Executor::new(Rc::new(dst), query.context.strategy))
}
