//! Event-driven simulation over a compiled DST.

use std::collections::HashSet;
use std::rc::Rc;

use cep_core::Event;
use cep_dst::{Config, Dst, Match};
use tracing::{debug, trace};

use crate::strategy::SkipStrategy;

/// Advances a pool of partial matches one event at a time, performing
/// in-line epsilon closure and emitting matches per the skip strategy.
pub struct Executor {
    dst: Rc<Dst>,
    strategy: SkipStrategy,
    /// Currently alive partial matches, each tagged with the step index
    /// `k` at which it was seeded.
    s: Vec<(u32, Config)>,
    /// Index of the next event, starting at 1 after the first `feed`.
    i: u32,
}

impl Executor {
    pub fn new(dst: Rc<Dst>, strategy: SkipStrategy) -> Self {
        Executor {
            dst,
            strategy,
            s: Vec::new(),
            i: 0,
        }
    }

    pub fn reset(&mut self) {
        self.s.clear();
        self.i = 0;
    }

    pub fn feed(&mut self, event: &Event) -> Vec<Match> {
        self.i += 1;
        debug!(step = self.i, event = %event, "feed");

        let mut t: Vec<(u32, Config)> = std::mem::take(&mut self.s);
        t.push((self.i, self.dst.initial_configuration()));

        let mut idx = 0;
        while idx < t.len() {
            let (k, conf) = t[idx].clone();
            for edge in self.dst.outgoing(conf.state) {
                let ev_arg = if edge.is_epsilon() { None } else { Some(event) };
                if !self.dst.predicate_matches(edge, &conf, ev_arg) {
                    continue;
                }
                trace!(from = %conf.state, to = %edge.to, epsilon = edge.is_epsilon(), "trying edge");
                let new_conf = self.dst.advance(edge, &conf, ev_arg);

                if edge.is_epsilon() {
                    t.push((k, new_conf));
                } else {
                    trace!(to = %new_conf.state, "now go ahead");
                    self.s.push((k, new_conf.clone()));
                    if let Some(dig) = self.dst.find_accepting_via_epsilon(&new_conf) {
                        trace!(to = %dig.state, "found accepted");
                        self.s.push((k, dig));
                    }
                }
            }
            idx += 1;
        }

        self.build_output()
    }

    fn build_output(&mut self) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut pruned: HashSet<u32> = HashSet::new();

        for idx in 0..self.s.len() {
            let (k, conf) = self.s[idx].clone();
            if !self.dst.accepts(&conf) {
                continue;
            }
            match self.strategy {
                SkipStrategy::NoSkip => {
                    matches.push(self.dst.output(&conf));
                }
                SkipStrategy::SkipToNext => {
                    if pruned.contains(&k) {
                        continue;
                    }
                    matches.push(self.dst.output(&conf));
                    pruned.insert(k);
                }
                SkipStrategy::SkipPastLastEvent => {
                    matches.push(self.dst.output(&conf));
                    self.s.clear();
                    break;
                }
            }
        }

        matches
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
