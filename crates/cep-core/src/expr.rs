//! Condition/update expressions and their evaluator.
//!
//! Patterns and data-updates carry expressions, not strings — the textual
//! query language that would parse into this AST is out of scope (queries
//! arrive pre-built via an abstract loader). `Expr` is a tiny tree walked by
//! a single-pass, side-effect-free evaluator: literals, variable references,
//! arithmetic, comparisons, and boolean connectives only.

use std::fmt;

use indexmap::IndexMap;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// A condition or data-update expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Lit(Value),
    Var(String),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn lit(v: Value) -> Expr {
        Expr::Lit(v)
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn not(e: Expr) -> Expr {
        Expr::Unary(UnOp::Not, Box::new(e))
    }

    pub fn and(a: Expr, b: Expr) -> Expr {
        Expr::Binary(BinOp::And, Box::new(a), Box::new(b))
    }

    pub fn or(a: Expr, b: Expr) -> Expr {
        Expr::Binary(BinOp::Or, Box::new(a), Box::new(b))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Lit(v) => write!(f, "{v}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Unary(UnOp::Not, e) => write!(f, "not ({e})"),
            Expr::Unary(UnOp::Neg, e) => write!(f, "-({e})"),
            Expr::Binary(op, a, b) => {
                let sym = match op {
                    BinOp::Add => "+",
                    BinOp::Sub => "-",
                    BinOp::Mul => "*",
                    BinOp::Div => "/",
                    BinOp::Eq => "==",
                    BinOp::Ne => "!=",
                    BinOp::Lt => "<",
                    BinOp::Le => "<=",
                    BinOp::Gt => ">",
                    BinOp::Ge => ">=",
                    BinOp::And => "and",
                    BinOp::Or => "or",
                };
                write!(f, "({a} {sym} {b})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("unknown identifier: {0}")]
    UnknownName(String),
}

/// The merged name-resolution view: event attribute names shadow
/// data-environment names on conflict. Built without copying the
/// data-environment when there is no shadowing.
pub struct Env<'a> {
    eta: &'a IndexMap<String, Value>,
    attrs: Option<&'a IndexMap<String, Value>>,
}

impl<'a> Env<'a> {
    pub fn new(eta: &'a IndexMap<String, Value>) -> Self {
        Self { eta, attrs: None }
    }

    pub fn merged(eta: &'a IndexMap<String, Value>, attrs: &'a IndexMap<String, Value>) -> Self {
        Self {
            eta,
            attrs: Some(attrs),
        }
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.attrs
            .and_then(|a| a.get(name))
            .or_else(|| self.eta.get(name))
            .copied()
    }
}

/// Evaluate an expression to a `Value`.
pub fn eval(expr: &Expr, env: &Env<'_>) -> Result<Value, EvalError> {
    match expr {
        Expr::Lit(v) => Ok(*v),
        Expr::Var(name) => env
            .lookup(name)
            .ok_or_else(|| EvalError::UnknownName(name.clone())),
        Expr::Unary(UnOp::Not, e) => Ok(Value::from_bool(!eval(e, env)?.truthy())),
        Expr::Unary(UnOp::Neg, e) => Ok(Value::Int(0) - eval(e, env)?),
        Expr::Binary(op, a, b) => eval_binary(*op, a, b, env),
    }
}

fn eval_binary(op: BinOp, a: &Expr, b: &Expr, env: &Env<'_>) -> Result<Value, EvalError> {
    use BinOp::*;
    match op {
        And => {
            let lhs = eval(a, env)?;
            if !lhs.truthy() {
                return Ok(Value::FALSE);
            }
            Ok(Value::from_bool(eval(b, env)?.truthy()))
        }
        Or => {
            let lhs = eval(a, env)?;
            if lhs.truthy() {
                return Ok(Value::TRUE);
            }
            Ok(Value::from_bool(eval(b, env)?.truthy()))
        }
        Add | Sub | Mul | Div | Eq | Ne | Lt | Le | Gt | Ge => {
            let lhs = eval(a, env)?;
            let rhs = eval(b, env)?;
            Ok(match op {
                Add => lhs + rhs,
                Sub => lhs - rhs,
                Mul => lhs * rhs,
                Div => lhs / rhs,
                Eq => Value::from_bool(lhs.partial_cmp(&rhs) == Some(std::cmp::Ordering::Equal)),
                Ne => Value::from_bool(lhs.partial_cmp(&rhs) != Some(std::cmp::Ordering::Equal)),
                Lt => Value::from_bool(lhs.partial_cmp(&rhs) == Some(std::cmp::Ordering::Less)),
                Le => Value::from_bool(matches!(
                    lhs.partial_cmp(&rhs),
                    Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
                )),
                Gt => Value::from_bool(lhs.partial_cmp(&rhs) == Some(std::cmp::Ordering::Greater)),
                Ge => Value::from_bool(matches!(
                    lhs.partial_cmp(&rhs),
                    Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
                )),
                And | Or => unreachable!("handled above"),
            })
        }
    }
}

/// Evaluate an expression and coerce the result to `bool` via truthiness.
pub fn eval_bool(expr: &Expr, env: &Env<'_>) -> Result<bool, EvalError> {
    Ok(eval(expr, env)?.truthy())
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod expr_tests;
