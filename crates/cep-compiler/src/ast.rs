//! The pattern AST: the compiler's input, mirroring the abstract query
//! schema node-for-node. Built directly by callers (or `cep`'s facade);
//! there is no textual parser in this crate.

use cep_core::Expr;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contiguity {
    Strict,
    Relaxed,
    NdRelaxed,
}

/// A data variable's seed value and per-TAKE update expression.
#[derive(Debug, Clone)]
pub struct VarInit {
    pub initial: cep_core::Value,
    pub update: Expr,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopBounded {
    pub contiguity: Contiguity,
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopUnbounded {
    pub contiguity: Contiguity,
    pub from: u32,
}

#[derive(Debug, Clone)]
pub enum Ast {
    Spat {
        name: String,
        event: String,
        cndt: Expr,
        variables: IndexMap<String, VarInit>,
    },
    Lpat {
        name: String,
        event: String,
        cndt: Expr,
        variables: IndexMap<String, VarInit>,
        loop_: LoopBounded,
    },
    LpatInf {
        name: String,
        event: String,
        cndt: Expr,
        variables: IndexMap<String, VarInit>,
        loop_: LoopUnbounded,
        until: Option<Expr>,
    },
    Combine {
        contiguity: Contiguity,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Gpat {
        child: Box<Ast>,
    },
    GpatTimes {
        child: Box<Ast>,
        loop_: LoopBounded,
    },
    GpatInf {
        child: Box<Ast>,
        loop_: LoopUnbounded,
        until: Option<Expr>,
    },
}

impl Ast {
    /// Every event type named anywhere in this AST (Σ), used to validate
    /// schema completeness before compiling a relaxed loop or combine.
    pub fn event_types(&self) -> std::collections::BTreeSet<String> {
        let mut set = std::collections::BTreeSet::new();
        self.collect_event_types(&mut set);
        set
    }

    fn collect_event_types(&self, set: &mut std::collections::BTreeSet<String>) {
        match self {
            Ast::Spat { event, .. } | Ast::Lpat { event, .. } | Ast::LpatInf { event, .. } => {
                set.insert(event.clone());
            }
            Ast::Combine { left, right, .. } => {
                left.collect_event_types(set);
                right.collect_event_types(set);
            }
            Ast::Gpat { child } | Ast::GpatTimes { child, .. } | Ast::GpatInf { child, .. } => {
                child.collect_event_types(set);
            }
        }
    }

    /// Every pattern-variable name bound anywhere in this AST (must be
    /// unique query-wide).
    pub fn pattern_vars(&self, out: &mut Vec<String>) {
        match self {
            Ast::Spat { name, .. } | Ast::Lpat { name, .. } | Ast::LpatInf { name, .. } => {
                out.push(name.clone());
            }
            Ast::Combine { left, right, .. } => {
                left.pattern_vars(out);
                right.pattern_vars(out);
            }
            Ast::Gpat { child } | Ast::GpatTimes { child, .. } | Ast::GpatInf { child, .. } => {
                child.pattern_vars(out);
            }
        }
    }

    /// Whether any node in this AST requires a non-strict contiguity,
    /// meaning the schema completeness check must run.
    pub fn has_relaxed_contiguity(&self) -> bool {
        match self {
            Ast::Spat { .. } => false,
            Ast::Lpat { loop_, .. } => loop_.contiguity != Contiguity::Strict,
            Ast::LpatInf { loop_, .. } => loop_.contiguity != Contiguity::Strict,
            Ast::Combine {
                contiguity,
                left,
                right,
            } => {
                *contiguity != Contiguity::Strict
                    || left.has_relaxed_contiguity()
                    || right.has_relaxed_contiguity()
            }
            Ast::Gpat { child } => child.has_relaxed_contiguity(),
            Ast::GpatTimes { child, .. } => child.has_relaxed_contiguity(),
            Ast::GpatInf { child, .. } => child.has_relaxed_contiguity(),
        }
    }
}
