//! Debug-only structural checks over a freshly compiled `Dst`.
//!
//! Mirrors the teacher's `plotnik-core::invariants` module: compiled-in
//! only for debug builds, since a correct compiler never violates these —
//! they guard the compiler, not user input.

use std::collections::HashSet;

use crate::dst::Dst;
use crate::predicate::EventTag;

/// Walks `dst` and debug-asserts every structural invariant from the data
/// model: `q0 ∈ Q`, every transition endpoint ∈ Q, every final state has
/// non-empty `out`, epsilon transitions carry identity updates, and TAKE
/// transitions always carry a concrete tag.
pub fn debug_check_dst(dst: &Dst) {
    if !cfg!(debug_assertions) {
        return;
    }
    let ids: HashSet<_> = dst.states.iter().map(|s| s.id).collect();
    debug_assert!(ids.contains(&dst.q0), "q0 not present among states");

    for state in &dst.states {
        if let Some(out) = &state.out {
            debug_assert!(!out.is_empty(), "final state {} has empty out", state.id);
        }
    }

    for (from, edges) in &dst.transitions {
        debug_assert!(ids.contains(from), "transition source {from} not in Q");
        for t in edges {
            debug_assert!(ids.contains(&t.to), "transition target {} not in Q", t.to);
            if t.is_epsilon() {
                debug_assert!(
                    t.data_update.is_empty(),
                    "epsilon transition carries a data-update"
                );
                debug_assert!(
                    t.stream_update.is_none(),
                    "epsilon transition carries a stream-update (TAKE on ε)"
                );
            }
            if t.stream_update.is_some() {
                debug_assert_ne!(
                    t.predicate.tag,
                    EventTag::Epsilon,
                    "TAKE transition has an epsilon tag"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataUpdate;
    use crate::predicate::Predicate;
    use crate::state::{Out, State};
    use crate::transition::Transition;
    use cep_core::{Expr, Value};
    use indexmap::IndexMap;
    use std::collections::BTreeSet;

    #[test]
    fn well_formed_dst_passes() {
        let q0 = State::fresh();
        let mut out = Out::new();
        out.insert("a".to_string(), "a".to_string());
        let qf = State::fresh_final(out);
        let t = Transition::take(
            q0.id,
            Predicate::of_type("e", Expr::lit(Value::TRUE)),
            qf.id,
            DataUpdate::new(),
            "a",
        );
        let mut transitions = IndexMap::new();
        transitions.insert(q0.id, vec![t]);
        let dst = Dst {
            event_types: BTreeSet::new(),
            pattern_vars: BTreeSet::new(),
            data_vars: BTreeSet::new(),
            output_names: BTreeSet::new(),
            states: vec![q0.clone(), qf],
            q0: q0.id,
            eta0: Default::default(),
            transitions,
        };
        debug_check_dst(&dst);
    }
}
