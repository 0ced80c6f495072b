//! Ignore-shadow edge construction shared by `lpat`, `lpat-inf`, and
//! `combine` — the three node kinds whose non-strict contiguity modes
//! need "skip a non-matching/any event without consuming a slot" edges.

use cep_dst::{neg, with_until, Predicate, StateId, Transition};
use indexmap::IndexMap;

use crate::ast::Contiguity;
use crate::error::CompileError;

/// Verify `schema` lists every event type in `universe`, the whole
/// query's Σ. Relaxed contiguity needs to enumerate "every other event
/// type"; an incomplete schema can't answer that.
pub fn check_schema_complete(
    schema: &IndexMap<String, Vec<String>>,
    universe: &std::collections::BTreeSet<String>,
) -> Result<(), CompileError> {
    let missing: Vec<String> = universe
        .iter()
        .filter(|ty| !schema.contains_key(ty.as_str()))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CompileError::SchemaIncomplete { missing })
    }
}

/// Add the ignore-shadow edges from `from` into `ignore`, and `ignore`'s
/// own self-loop(s), for the given contiguity mode. `event`/`cndt`
/// describe the loop's own expected type and condition; `schema` is
/// used (relaxed only) to enumerate every other event type, in
/// declaration order. `until`, when present, is applied to every
/// predicate built here — these are non-ε transitions, so an event that
/// satisfies `until` must terminate the loop rather than be silently
/// ignored (spec §4.3.3: `with_until` applies to every non-ε transition).
#[allow(clippy::too_many_arguments)]
pub fn add_ignore_edges(
    transitions_out: &mut Vec<Transition>,
    from: StateId,
    ignore: StateId,
    event: &str,
    cndt: &cep_core::Expr,
    contiguity: Contiguity,
    schema: &IndexMap<String, Vec<String>>,
    until: Option<&cep_core::Expr>,
) {
    let tighten = |p: Predicate| match until {
        Some(u) => with_until(&p, u),
        None => p,
    };

    let own = Predicate::of_type(event, cndt.clone());
    match contiguity {
        Contiguity::Strict => {}
        Contiguity::Relaxed => {
            let not_own = tighten(neg(&own));
            transitions_out.push(Transition::ignore(
                from,
                not_own.clone(),
                ignore,
                Default::default(),
            ));
            transitions_out.push(Transition::ignore(
                ignore,
                not_own,
                ignore,
                Default::default(),
            ));
            for other_ty in schema.keys().filter(|ty| ty.as_str() != event) {
                let any = tighten(Predicate::of_type(
                    other_ty.clone(),
                    cep_core::Expr::lit(cep_core::Value::TRUE),
                ));
                transitions_out.push(Transition::ignore(from, any.clone(), ignore, Default::default()));
                transitions_out.push(Transition::ignore(ignore, any, ignore, Default::default()));
            }
        }
        Contiguity::NdRelaxed => {
            let any = tighten(Predicate::any(cep_core::Expr::lit(cep_core::Value::TRUE)));
            transitions_out.push(Transition::ignore(from, any.clone(), ignore, Default::default()));
            transitions_out.push(Transition::ignore(ignore, any, ignore, Default::default()));
        }
    }
}
