//! Transition predicates and the algebra the compiler builds them with.

use cep_core::{BinOp, Expr, UnOp};

/// What a transition consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTag {
    /// Consumes no event; only epsilon transitions carry this tag.
    Epsilon,
    /// Matches any concrete event, regardless of type.
    Any,
    /// Matches only events of the named type.
    Type(String),
}

/// `(event-type-tag or ε, condition)`. A predicate matches iff the tag is
/// satisfied and the condition evaluates true in the augmented environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub tag: EventTag,
    pub cond: Expr,
}

impl Predicate {
    pub fn epsilon() -> Predicate {
        Predicate {
            tag: EventTag::Epsilon,
            cond: Expr::lit(cep_core::Value::TRUE),
        }
    }

    pub fn any(cond: Expr) -> Predicate {
        Predicate {
            tag: EventTag::Any,
            cond,
        }
    }

    pub fn of_type(ty: impl Into<String>, cond: Expr) -> Predicate {
        Predicate {
            tag: EventTag::Type(ty.into()),
            cond,
        }
    }
}

/// Same tag, condition `not (p.cond)`.
pub fn neg(p: &Predicate) -> Predicate {
    Predicate {
        tag: p.tag.clone(),
        cond: Expr::Unary(UnOp::Not, Box::new(p.cond.clone())),
    }
}

/// Same tag, condition `(p.cond) and (not (until))` — the event must still
/// satisfy `p` but must not satisfy the `until` bound.
pub fn with_until(p: &Predicate, until: &Expr) -> Predicate {
    Predicate {
        tag: p.tag.clone(),
        cond: Expr::Binary(
            BinOp::And,
            Box::new(p.cond.clone()),
            Box::new(Expr::Unary(UnOp::Not, Box::new(until.clone()))),
        ),
    }
}
