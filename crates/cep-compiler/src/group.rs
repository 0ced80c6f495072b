//! `gpat-times` / `gpat-inf` (group pattern replication).
//!
//! `gpat` itself (no replication) is the identity — the child DST is used
//! directly, handled at the dispatch site in `lib.rs`.
//!
//! Each replica is produced by recompiling the child AST, not by cloning
//! a single compiled `Dst` — state ids are process-global and fresh per
//! compile, so recompiling is what gives each replica its own states.

use cep_dst::{with_until, Dst, Out, State, StateId};

use crate::ast::{Ast, LoopBounded, LoopUnbounded};
use crate::builder::DstBuilder;
use crate::error::CompileError;

fn union_final_out(dst: &Dst) -> Out {
    let mut out = Out::new();
    for s in &dst.states {
        if let Some(o) = &s.out {
            out.extend(o.clone());
        }
    }
    out
}

fn final_ids(dst: &Dst) -> Vec<StateId> {
    dst.states
        .iter()
        .filter(|s| s.is_final())
        .map(|s| s.id)
        .collect()
}

/// Tighten every non-epsilon transition's predicate with `until`, in
/// place, across the whole fragment.
fn tighten_with_until(dst: &mut Dst, until: &cep_core::Expr) {
    for edges in dst.transitions.values_mut() {
        for t in edges.iter_mut() {
            if !t.is_epsilon() {
                t.predicate = with_until(&t.predicate, until);
            }
        }
    }
}

fn clear_out(b: &mut DstBuilder, ids: &[StateId]) {
    for state in &mut b.states {
        if ids.contains(&state.id) {
            state.out = None;
        }
    }
}

pub fn compile_gpat_times(
    loop_: LoopBounded,
    child_ast: &Ast,
    compile_child: &mut impl FnMut(&Ast) -> Result<Dst, CompileError>,
) -> Result<Dst, CompileError> {
    let n = loop_.from as usize;
    let m = loop_.to as usize;
    debug_assert!(m >= 1);

    let mut copies = Vec::with_capacity(m);
    for _ in 0..m {
        copies.push(compile_child(child_ast)?);
    }
    let qf_out = union_final_out(&copies[0]);

    let mut b = DstBuilder::new();
    let q0 = b.add_state(State::fresh());
    let qf = b.add_state(State::fresh_final(qf_out));

    let copy_q0s: Vec<StateId> = copies.iter().map(|c| c.q0).collect();
    let copy_finals: Vec<Vec<StateId>> = copies.iter().map(final_ids).collect();

    for copy in copies {
        b.absorb(copy);
    }
    for finals in &copy_finals {
        clear_out(&mut b, finals);
    }

    b.add_transition(cep_dst::Transition::epsilon(q0, copy_q0s[0]));
    for i in 0..m.saturating_sub(1) {
        for &f in &copy_finals[i] {
            b.add_transition(cep_dst::Transition::epsilon(f, copy_q0s[i + 1]));
        }
    }
    let lower = n.saturating_sub(1).min(m.saturating_sub(1));
    for i in lower..m {
        for &f in &copy_finals[i] {
            b.add_transition(cep_dst::Transition::epsilon(f, qf));
        }
    }

    Ok(b.finish(q0))
}

pub fn compile_gpat_inf(
    loop_: LoopUnbounded,
    until: Option<&cep_core::Expr>,
    child_ast: &Ast,
    compile_child: &mut impl FnMut(&Ast) -> Result<Dst, CompileError>,
) -> Result<Dst, CompileError> {
    let zero_allowed = loop_.from == 0;
    let n = if zero_allowed { 1 } else { loop_.from as usize };
    debug_assert!(n >= 1);

    let mut copies = Vec::with_capacity(n);
    for _ in 0..n {
        let mut c = compile_child(child_ast)?;
        if let Some(u) = until {
            tighten_with_until(&mut c, u);
        }
        copies.push(c);
    }
    let qf_out = union_final_out(&copies[n - 1]);

    let mut b = DstBuilder::new();
    let q0 = b.add_state(State::fresh());
    let qf = b.add_state(State::fresh_final(qf_out));

    let copy_q0s: Vec<StateId> = copies.iter().map(|c| c.q0).collect();
    let copy_finals: Vec<Vec<StateId>> = copies.iter().map(final_ids).collect();

    for copy in copies {
        b.absorb(copy);
    }
    for finals in &copy_finals {
        clear_out(&mut b, finals);
    }

    b.add_transition(cep_dst::Transition::epsilon(q0, copy_q0s[0]));
    for i in 0..n.saturating_sub(1) {
        for &f in &copy_finals[i] {
            b.add_transition(cep_dst::Transition::epsilon(f, copy_q0s[i + 1]));
        }
    }
    // tight loop after reaching the minimum
    for &f in &copy_finals[n - 1] {
        b.add_transition(cep_dst::Transition::epsilon(f, copy_q0s[n - 1]));
        b.add_transition(cep_dst::Transition::epsilon(f, qf));
    }
    if zero_allowed {
        b.add_transition(cep_dst::Transition::epsilon(q0, qf));
    }

    Ok(b.finish(q0))
}
