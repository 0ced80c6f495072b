//! `combine(left, right, contiguity θ)` (sequencing).
//!
//! Compiles left and right independently, unions their states and
//! transitions, chains left's final states into right's entry via ε, and
//! (when θ ≠ strict) adds a single ignore-shadow state mirroring right's
//! entry-point takes so non-matching events between the two sub-patterns
//! don't break the sequence.

use cep_dst::{EventTag, Out, Predicate, State, StateId, Transition};
use indexmap::IndexMap;

use crate::ast::Contiguity;
use crate::builder::DstBuilder;
use crate::contiguity::add_ignore_edges;

pub fn compile_combine(
    contiguity: Contiguity,
    left: cep_dst::Dst,
    right: cep_dst::Dst,
    schema: &IndexMap<String, Vec<String>>,
) -> cep_dst::Dst {
    let left_q0 = left.q0;
    let right_q0 = right.q0;

    // Right wins on data-variable conflicts.
    let eta0 = left
        .eta0
        .clone()
        .into_iter()
        .chain(right.eta0.clone())
        .collect();

    let left_final_ids: Vec<StateId> = left
        .states
        .iter()
        .filter(|s| s.is_final())
        .map(|s| s.id)
        .collect();
    let mut left_out_union = Out::new();
    for s in &left.states {
        if let Some(out) = &s.out {
            left_out_union.extend(out.clone());
        }
    }

    let mut b = DstBuilder::new();
    b.absorb(left);
    b.absorb(right);
    b.eta0 = eta0;

    // Merge left's combined out into every right-final state, then clear
    // left's own finals (no longer accepting as stand-alone).
    for state in &mut b.states {
        if left_final_ids.contains(&state.id) {
            state.out = None;
        } else if let Some(out) = &mut state.out {
            let mut merged = left_out_union.clone();
            merged.extend(out.clone());
            *out = merged;
        }
    }

    for qL in &left_final_ids {
        b.add_transition(Transition::epsilon(*qL, right_q0));
    }

    if contiguity != Contiguity::Strict {
        let q02_ignore = b.add_state(State::fresh());
        let right_q0_takes: Vec<Transition> = b
            .transitions
            .get(&right_q0)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|t| t.stream_update.is_some())
            .collect();

        for t in &right_q0_takes {
            b.add_transition(Transition {
                from: q02_ignore,
                predicate: t.predicate.clone(),
                to: t.to,
                data_update: t.data_update.clone(),
                stream_update: t.stream_update.clone(),
            });
        }

        let mut edges = Vec::new();
        if let Some(repr) = right_q0_takes.first() {
            match &repr.predicate.tag {
                EventTag::Type(ty) => {
                    add_ignore_edges(
                        &mut edges,
                        right_q0,
                        q02_ignore,
                        ty,
                        &repr.predicate.cond,
                        contiguity,
                        schema,
                        None,
                    );
                }
                EventTag::Any => {
                    let any = Predicate::any(cep_core::Expr::lit(cep_core::Value::TRUE));
                    edges.push(Transition::ignore(
                        right_q0,
                        any.clone(),
                        q02_ignore,
                        Default::default(),
                    ));
                    edges.push(Transition::ignore(
                        q02_ignore,
                        any,
                        q02_ignore,
                        Default::default(),
                    ));
                }
                EventTag::Epsilon => {}
            }
        } else if contiguity == Contiguity::NdRelaxed {
            let any = Predicate::any(cep_core::Expr::lit(cep_core::Value::TRUE));
            edges.push(Transition::ignore(
                right_q0,
                any.clone(),
                q02_ignore,
                Default::default(),
            ));
            edges.push(Transition::ignore(
                q02_ignore,
                any,
                q02_ignore,
                Default::default(),
            ));
        }
        for t in edges {
            b.add_transition(t);
        }
    }

    b.finish(left_q0)
}
