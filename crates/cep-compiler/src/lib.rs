//! Compositional AST-to-DST compiler: turns each pattern AST node kind
//! into a self-contained Data-Stream Transducer fragment and unions them
//! together.

mod ast;
mod builder;
mod combine;
mod contiguity;
mod error;
mod group;
mod lpat;
mod lpat_inf;
mod spat;

pub use ast::{Ast, Contiguity, LoopBounded, LoopUnbounded, VarInit};
pub use error::CompileError;

use std::collections::BTreeSet;

use cep_dst::Dst;
use indexmap::IndexMap;

/// Compile a pattern AST into a DST. `schema` must list every event type
/// in the AST whenever any node uses non-strict contiguity.
pub fn compile(ast: &Ast, schema: &IndexMap<String, Vec<String>>) -> Result<Dst, CompileError> {
    check_pattern_var_uniqueness(ast)?;
    let universe = ast.event_types();
    compile_inner(ast, schema, &universe)
}

fn check_pattern_var_uniqueness(ast: &Ast) -> Result<(), CompileError> {
    let mut names = Vec::new();
    ast.pattern_vars(&mut names);
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(CompileError::VariableConflict(name));
        }
    }
    Ok(())
}

fn compile_inner(
    ast: &Ast,
    schema: &IndexMap<String, Vec<String>>,
    universe: &BTreeSet<String>,
) -> Result<Dst, CompileError> {
    match ast {
        Ast::Spat {
            name,
            event,
            cndt,
            variables,
        } => Ok(spat::compile_spat(name, event, cndt, variables)),

        Ast::Lpat {
            name,
            event,
            cndt,
            variables,
            loop_,
        } => lpat::compile_lpat(name, event, cndt, variables, *loop_, schema, universe),

        Ast::LpatInf {
            name,
            event,
            cndt,
            variables,
            loop_,
            until,
        } => lpat_inf::compile_lpat_inf(
            name,
            event,
            cndt,
            variables,
            *loop_,
            until.as_ref(),
            schema,
            universe,
        ),

        Ast::Combine {
            contiguity,
            left,
            right,
        } => {
            let left_dst = compile_inner(left, schema, universe)?;
            let right_dst = compile_inner(right, schema, universe)?;
            Ok(combine::compile_combine(*contiguity, left_dst, right_dst, schema))
        }

        Ast::Gpat { child } => compile_inner(child, schema, universe),

        Ast::GpatTimes { child, loop_ } => {
            let mut compile_child = |a: &Ast| compile_inner(a, schema, universe);
            group::compile_gpat_times(*loop_, child, &mut compile_child)
        }

        Ast::GpatInf {
            child,
            loop_,
            until,
        } => {
            let mut compile_child = |a: &Ast| compile_inner(a, schema, universe);
            group::compile_gpat_inf(*loop_, until.as_ref(), child, &mut compile_child)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cep_core::{BinOp, Expr, Value};
    use indexmap::IndexMap as Map;

    fn eq_name_one() -> Expr {
        Expr::Binary(
            BinOp::Eq,
            Box::new(Expr::var("name")),
            Box::new(Expr::lit(Value::Int(1))),
        )
    }

    #[test]
    fn duplicate_pattern_vars_rejected() {
        let left = Ast::Spat {
            name: "a".to_string(),
            event: "e".to_string(),
            cndt: eq_name_one(),
            variables: Map::new(),
        };
        let right = Ast::Spat {
            name: "a".to_string(),
            event: "e".to_string(),
            cndt: eq_name_one(),
            variables: Map::new(),
        };
        let ast = Ast::Combine {
            contiguity: Contiguity::Strict,
            left: Box::new(left),
            right: Box::new(right),
        };
        let err = compile(&ast, &Map::new()).unwrap_err();
        assert!(matches!(err, CompileError::VariableConflict(_)));
    }

    #[test]
    fn relaxed_without_schema_is_incomplete() {
        let ast = Ast::Lpat {
            name: "al".to_string(),
            event: "e".to_string(),
            cndt: eq_name_one(),
            variables: Map::new(),
            loop_: LoopBounded {
                contiguity: Contiguity::Relaxed,
                from: 2,
                to: 3,
            },
        };
        let err = compile(&ast, &Map::new()).unwrap_err();
        assert!(matches!(err, CompileError::SchemaIncomplete { .. }));
    }

    #[test]
    fn simple_spat_compiles() {
        let ast = Ast::Spat {
            name: "a1".to_string(),
            event: "e".to_string(),
            cndt: eq_name_one(),
            variables: Map::new(),
        };
        let dst = compile(&ast, &Map::new()).unwrap();
        assert_eq!(dst.pattern_vars.len(), 1);
    }
}
