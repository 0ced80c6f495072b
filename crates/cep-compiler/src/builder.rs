//! Accumulator used by each `compile_*` function to assemble a
//! self-contained DST fragment.

use std::collections::BTreeSet;

use cep_dst::{DataEnv, Dst, State, StateId, Transition};
use indexmap::IndexMap;

#[derive(Default)]
pub struct DstBuilder {
    pub event_types: BTreeSet<String>,
    pub pattern_vars: BTreeSet<String>,
    pub data_vars: BTreeSet<String>,
    pub output_names: BTreeSet<String>,
    pub states: Vec<State>,
    pub eta0: DataEnv,
    pub transitions: IndexMap<StateId, Vec<Transition>>,
}

impl DstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, s: State) -> StateId {
        let id = s.id;
        self.states.push(s);
        id
    }

    pub fn add_transition(&mut self, t: Transition) {
        self.transitions.entry(t.from).or_default().push(t);
    }

    /// Merge another fully-built fragment's states and transitions into
    /// this builder, for compositional node kinds (`combine`, `group`)
    /// that union sub-DSTs. Does *not* touch `eta0` — callers apply the
    /// node-kind-specific merge rule for data-environments themselves.
    pub fn absorb(&mut self, other: Dst) {
        self.event_types.extend(other.event_types);
        self.pattern_vars.extend(other.pattern_vars);
        self.data_vars.extend(other.data_vars);
        self.output_names.extend(other.output_names);
        self.states.extend(other.states);
        for (from, edges) in other.transitions {
            self.transitions.entry(from).or_default().extend(edges);
        }
    }

    pub fn finish(self, q0: StateId) -> Dst {
        Dst {
            event_types: self.event_types,
            pattern_vars: self.pattern_vars,
            data_vars: self.data_vars,
            output_names: self.output_names,
            states: self.states,
            q0,
            eta0: self.eta0,
            transitions: self.transitions,
        }
    }
}
