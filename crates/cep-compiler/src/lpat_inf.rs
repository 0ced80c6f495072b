//! `lpat-inf` (unbounded loop `n..∞`, optional `until`, optional `n=0`).
//!
//! States `q[0]..q[n]`, `qnp` ("not proceed" sink for ignoring after the
//! last take), `qf`. When `n=0` this is compiled as `n=1` plus an extra
//! `q[0] --ε--> qf` to model "zero or more".

use indexmap::IndexMap;

use cep_dst::{with_until, DataUpdate, Out, Predicate, State, Transition};

use crate::ast::{Contiguity, LoopUnbounded, VarInit};
use crate::builder::DstBuilder;
use crate::contiguity::{add_ignore_edges, check_schema_complete};
use crate::error::CompileError;

#[allow(clippy::too_many_arguments)]
pub fn compile_lpat_inf(
    name: &str,
    event: &str,
    cndt: &cep_core::Expr,
    variables: &IndexMap<String, VarInit>,
    loop_: LoopUnbounded,
    until: Option<&cep_core::Expr>,
    schema: &IndexMap<String, Vec<String>>,
    universe: &std::collections::BTreeSet<String>,
) -> Result<cep_dst::Dst, CompileError> {
    if loop_.contiguity != Contiguity::Strict {
        check_schema_complete(schema, universe)?;
    }

    let mut b = DstBuilder::new();
    let zero_allowed = loop_.from == 0;
    let n = if zero_allowed { 1 } else { loop_.from as usize };

    let mut data_update = DataUpdate::new();
    for (var, init) in variables {
        b.eta0.insert(var.clone(), init.initial);
        data_update.insert(var.clone(), init.update.clone());
    }

    let mut q = Vec::with_capacity(n + 1);
    for _ in 0..=n {
        q.push(b.add_state(State::fresh()));
    }
    let qnp = b.add_state(State::fresh());
    let mut out = Out::new();
    out.insert(name.to_string(), name.to_string());
    let qf = b.add_state(State::fresh_final(out));

    let base_predicate = Predicate::of_type(event, cndt.clone());
    let predicate = match until {
        Some(u) => with_until(&base_predicate, u),
        None => base_predicate,
    };

    for i in 0..n {
        b.add_transition(Transition::take(
            q[i],
            predicate.clone(),
            q[i + 1],
            data_update.clone(),
            name,
        ));
    }
    b.add_transition(Transition::take(
        q[n],
        predicate.clone(),
        q[n],
        data_update.clone(),
        name,
    ));
    b.add_transition(Transition::take(
        qnp,
        predicate.clone(),
        q[n],
        data_update.clone(),
        name,
    ));
    b.add_transition(Transition::epsilon(q[n], qf));
    if zero_allowed {
        b.add_transition(Transition::epsilon(q[0], qf));
    }

    if loop_.contiguity != Contiguity::Strict {
        for i in 1..n {
            let qign = b.add_state(State::fresh());
            let mut edges = Vec::new();
            add_ignore_edges(&mut edges, q[i], qign, event, cndt, loop_.contiguity, schema, until);
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
        let mut edges = Vec::new();
        add_ignore_edges(&mut edges, q[n], qnp, event, cndt, loop_.contiguity, schema, until);
        for t in edges {
            b.add_transition(t);
        }
    }

    b.event_types.insert(event.to_string());
    b.pattern_vars.insert(name.to_string());
    b.data_vars.extend(variables.keys().cloned());
    b.output_names.insert(name.to_string());

    Ok(b.finish(q[0]))
}
