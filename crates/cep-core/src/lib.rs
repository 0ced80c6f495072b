#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Data model shared by the CEP compiler and executor: event and
//! attribute records, scalar values, and the condition/update expression
//! language they're evaluated against.

mod event;
mod expr;
mod value;

pub use event::{Attrs, Event};
pub use expr::{eval, eval_bool, BinOp, Env, EvalError, Expr, UnOp};
pub use value::Value;
