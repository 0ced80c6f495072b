//! `lpat` (bounded loop, `n..m`).
//!
//! States `q[0]..q[m]`, `qf`. TAKE advances the count; PROCEED (ε) marks
//! `qf` reachable from every count in `[n, m]`; non-strict contiguity adds
//! one ignore-shadow state per intermediate count, `qign[1]..qign[m-1]`,
//! that retries the take without advancing the count.
//!
//! Note on indexing: `spec.md` describes the ignore-shadow re-entry edge
//! as `q_ign[i] --(e,c)--> q[i+2]`, but taken literally that runs past
//! `q[m]` when `i = m-1`. This implementation instead has `qign[i]` retry
//! exactly the take that would have advanced `q[i] -> q[i+1]` — i.e.
//! `qign[i] --(e,c)--> q[i+1]` — which satisfies "an ignore step does not
//! consume a slot" without the off-by-one. See `DESIGN.md`.

use indexmap::IndexMap;

use cep_dst::{DataUpdate, Out, Predicate, State, Transition};

use crate::ast::{Contiguity, LoopBounded, VarInit};
use crate::builder::DstBuilder;
use crate::contiguity::{add_ignore_edges, check_schema_complete};
use crate::error::CompileError;

#[allow(clippy::too_many_arguments)]
pub fn compile_lpat(
    name: &str,
    event: &str,
    cndt: &cep_core::Expr,
    variables: &IndexMap<String, VarInit>,
    loop_: LoopBounded,
    schema: &IndexMap<String, Vec<String>>,
    universe: &std::collections::BTreeSet<String>,
) -> Result<cep_dst::Dst, CompileError> {
    if loop_.contiguity != Contiguity::Strict {
        check_schema_complete(schema, universe)?;
    }

    let mut b = DstBuilder::new();
    let n = loop_.from as usize;
    let m = loop_.to as usize;

    let mut data_update = DataUpdate::new();
    for (var, init) in variables {
        b.eta0.insert(var.clone(), init.initial);
        data_update.insert(var.clone(), init.update.clone());
    }

    let mut q = Vec::with_capacity(m + 1);
    for _ in 0..=m {
        q.push(b.add_state(State::fresh()));
    }
    let mut out = Out::new();
    out.insert(name.to_string(), name.to_string());
    let qf = b.add_state(State::fresh_final(out));

    let predicate = Predicate::of_type(event, cndt.clone());

    for i in 0..m {
        b.add_transition(Transition::take(
            q[i],
            predicate.clone(),
            q[i + 1],
            data_update.clone(),
            name,
        ));
    }
    for i in n..=m {
        b.add_transition(Transition::epsilon(q[i], qf));
    }

    if loop_.contiguity != Contiguity::Strict && m >= 2 {
        for i in 1..m {
            let qign = b.add_state(State::fresh());
            let mut edges = Vec::new();
            add_ignore_edges(&mut edges, q[i], qign, event, cndt, loop_.contiguity, schema, None);
            edges.push(Transition::take(
                qign,
                predicate.clone(),
                q[i + 1],
                data_update.clone(),
                name,
            ));
            for t in edges {
                b.add_transition(t);
            }
        }
    }

    b.event_types.insert(event.to_string());
    b.pattern_vars.insert(name.to_string());
    b.data_vars.extend(variables.keys().cloned());
    b.output_names.insert(name.to_string());

    Ok(b.finish(q[0]))
}
