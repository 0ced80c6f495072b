//! The Data-Stream Transducer: compiled graph plus configuration-stepping
//! operations.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use cep_core::{Env, Event};
use indexmap::IndexMap;

use crate::config::{Config, Context, DataEnv};
use crate::predicate::EventTag;
use crate::state::{State, StateId};
use crate::transition::Transition;

/// A match: output-name → ordered events bound to the corresponding
/// pattern variable.
pub type Match = IndexMap<String, Vec<Event>>;

/// The compiled, immutable state graph produced by the AST compiler.
#[derive(Debug, Clone)]
pub struct Dst {
    pub event_types: BTreeSet<String>,
    pub pattern_vars: BTreeSet<String>,
    pub data_vars: BTreeSet<String>,
    pub output_names: BTreeSet<String>,
    pub states: Vec<State>,
    pub q0: StateId,
    pub eta0: DataEnv,
    pub transitions: IndexMap<StateId, Vec<Transition>>,
}

impl Dst {
    pub fn state(&self, id: StateId) -> &State {
        self.states
            .iter()
            .find(|s| s.id == id)
            .expect("StateId not present in this Dst")
    }

    pub fn initial_configuration(&self) -> Config {
        Config::new(
            self.q0,
            Rc::new(self.eta0.clone()),
            Rc::new(Context::new()),
            false,
        )
    }

    pub fn outgoing(&self, q: StateId) -> &[Transition] {
        self.transitions.get(&q).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Epsilon transitions require `event.is_none()`; non-epsilon
    /// transitions require `event.is_some()` and a tag match, then
    /// evaluate the condition. An `EvalError` here is recovered as `false`.
    pub fn predicate_matches(&self, t: &Transition, conf: &Config, event: Option<&Event>) -> bool {
        match (&t.predicate.tag, event) {
            (EventTag::Epsilon, None) => {}
            (EventTag::Epsilon, Some(_)) => return false,
            (_, None) => return false,
            (EventTag::Any, Some(_)) => {}
            (EventTag::Type(ty), Some(ev)) if ev.ty == *ty => {}
            (EventTag::Type(_), Some(_)) => return false,
        }

        let env = match event {
            Some(ev) => Env::merged(&conf.env, &ev.attrs),
            None => Env::new(&conf.env),
        };
        cep_core::eval_bool(&t.predicate.cond, &env).unwrap_or(false)
    }

    /// New η = α applied to `conf.env`; new ctx = β applied. Identity
    /// updates reuse the prior `Rc` without cloning.
    pub fn advance(&self, t: &Transition, conf: &Config, event: Option<&Event>) -> Config {
        let env = if t.data_update.is_empty() {
            Rc::clone(&conf.env)
        } else {
            let lookup_env = match event {
                Some(ev) => Env::merged(&conf.env, &ev.attrs),
                None => Env::new(&conf.env),
            };
            let mut next = (*conf.env).clone();
            for (var, expr) in &t.data_update {
                if let Ok(v) = cep_core::eval(expr, &lookup_env) {
                    next.insert(var.clone(), v);
                }
            }
            Rc::new(next)
        };

        let ctx = match (&t.stream_update, event) {
            (Some(sink), Some(ev)) => {
                let mut next = (*conf.ctx).clone();
                next.entry(sink.clone())
                    .or_insert_with(|| Rc::new(Vec::new()));
                let bucket = Rc::make_mut(next.get_mut(sink).unwrap());
                bucket.push(ev.clone());
                Rc::new(next)
            }
            _ => Rc::clone(&conf.ctx),
        };

        let last_take = if t.is_epsilon() {
            conf.last_take
        } else {
            t.stream_update.is_some()
        };

        Config::new(t.to, env, ctx, last_take)
    }

    /// `conf.state` is final ∧ `conf.last_take`.
    pub fn accepts(&self, conf: &Config) -> bool {
        self.state(conf.state).is_final() && conf.last_take
    }

    /// For each `(output_name, pattern_var)` in the final state's `out`,
    /// emit `output_name → ctx[pattern_var]` when bound.
    pub fn output(&self, conf: &Config) -> Match {
        let mut m = Match::new();
        let Some(out) = self.state(conf.state).out.as_ref() else {
            return m;
        };
        for (output_name, pattern_var) in out {
            if let Some(events) = conf.ctx.get(pattern_var) {
                m.insert(output_name.clone(), (**events).clone());
            }
        }
        m
    }

    /// DFS strictly beyond `conf` along epsilon-only edges, tracking
    /// visited states to terminate cycles, returning the first accepting
    /// configuration found (depth-first, edge declaration order). `conf`
    /// itself is never returned even if already accepting — the caller
    /// already sees `conf` directly; this only surfaces configurations
    /// reachable via at least one further epsilon step.
    pub fn find_accepting_via_epsilon(&self, conf: &Config) -> Option<Config> {
        let mut visited: HashSet<StateId> = HashSet::new();
        visited.insert(conf.state);
        self.dig(conf, &mut visited)
    }

    fn dig(&self, conf: &Config, visited: &mut HashSet<StateId>) -> Option<Config> {
        for t in self.outgoing(conf.state) {
            if !t.is_epsilon() || !self.predicate_matches(t, conf, None) {
                continue;
            }
            let next = self.advance(t, conf, None);
            if self.accepts(&next) {
                return Some(next);
            }
            if visited.insert(next.state) {
                if let Some(found) = self.dig(&next, visited) {
                    return Some(found);
                }
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "dst_tests.rs"]
mod dst_tests;
