//! Query AST, re-exported from the compiler crate that owns its
//! definition (the compiler is this AST's only consumer besides callers
//! building queries by hand).

pub use cep_compiler::{Ast, Contiguity, LoopBounded, LoopUnbounded, VarInit};
