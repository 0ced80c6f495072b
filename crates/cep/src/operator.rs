//! One-shot application: reset the executor, feed events in order,
//! concatenate per-event outputs.

use cep_core::Event;
use cep_vm::{Executor, Match};

use crate::compile;
use crate::context::Query;
use cep_compiler::CompileError;

pub struct Operator {
    executor: Executor,
}

impl Operator {
    pub fn new(query: Query) -> Result<Self, CompileError> {
        let executor = compile(query)?;
        Ok(Operator { executor })
    }

    pub fn run(&mut self, events: impl IntoIterator<Item = Event>) -> Vec<Match> {
        self.executor.reset();
        let mut out = Vec::new();
        for event in events {
            out.extend(self.executor.feed(&event));
        }
        out
    }
}

/// `operator << stream` resets and feeds all events in order,
/// concatenating per-event outputs — the Rust rendering of the original
/// `CEPOperator.__lshift__`.
impl std::ops::Shl<&[Event]> for &mut Operator {
    type Output = Vec<Match>;

    fn shl(self, rhs: &[Event]) -> Vec<Match> {
        self.run(rhs.iter().cloned())
    }
}
