//! Runtime configuration: a value-semantics snapshot of one partial match.

use std::rc::Rc;

use cep_core::{Event, Value};
use indexmap::IndexMap;

use crate::state::StateId;

/// Per-partial-match data-environment (η): data-variable name → scalar.
pub type DataEnv = IndexMap<String, Value>;

/// Pattern-variable name → events bound to it so far, `Rc`-shared per
/// variable so "ctx unchanged" updates are O(1).
pub type Context = IndexMap<String, Rc<Vec<Event>>>;

/// α: data-variable name → update expression, applied atomically on TAKE.
pub type DataUpdate = IndexMap<String, cep_core::Expr>;

/// β: the sink pattern-variable an event is appended to on TAKE, if any.
pub type StreamUpdate = Option<String>;

/// `(state, data-env η, context ctx, last_take)`. Cheap to clone: two `Rc`
/// bumps, a `Copy` id, and a bool.
#[derive(Debug, Clone)]
pub struct Config {
    pub state: StateId,
    pub env: Rc<DataEnv>,
    pub ctx: Rc<Context>,
    /// Whether the most recent *non-epsilon* transition was a TAKE.
    /// Required to distinguish accepting configurations from ones that
    /// ended on an IGNORE.
    pub last_take: bool,
}

impl Config {
    pub fn new(state: StateId, env: Rc<DataEnv>, ctx: Rc<Context>, last_take: bool) -> Self {
        Config {
            state,
            env,
            ctx,
            last_take,
        }
    }
}
