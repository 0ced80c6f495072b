//! `spat` (single pattern): `name: p, event: e, cndt: c, variables?: V`.
//!
//! Two states q0, qf. One TAKE transition `q0 --(e,c)--> qf` with a
//! data-update seeded from `V`; qf is final with `out = {p: p}`.

use cep_dst::{Out, Predicate, State, Transition};
use indexmap::IndexMap;

use crate::ast::VarInit;

pub fn compile_spat(
    name: &str,
    event: &str,
    cndt: &cep_core::Expr,
    variables: &IndexMap<String, VarInit>,
) -> cep_dst::Dst {
    let mut b = crate::builder::DstBuilder::new();

    let q0 = b.add_state(State::fresh());
    let mut out = Out::new();
    out.insert(name.to_string(), name.to_string());
    let qf = b.add_state(State::fresh_final(out));

    let mut data_update = cep_dst::DataUpdate::new();
    for (var, init) in variables {
        b.eta0.insert(var.clone(), init.initial);
        data_update.insert(var.clone(), init.update.clone());
    }

    let predicate = Predicate::of_type(event, cndt.clone());
    b.add_transition(Transition::take(q0, predicate, qf, data_update, name));

    b.event_types.insert(event.to_string());
    b.pattern_vars.insert(name.to_string());
    b.data_vars.extend(variables.keys().cloned());
    b.output_names.insert(name.to_string());

    b.finish(q0)
}
