//! The Data-Stream Transducer: compiled graph representation and
//! configuration-stepping operations for the CEP engine.

mod config;
mod dst;
pub mod invariants;
mod predicate;
mod state;
mod transition;

pub use config::{Context, DataEnv, DataUpdate, StreamUpdate};
pub use dst::{Dst, Match};
pub use predicate::{neg, with_until, EventTag, Predicate};
pub use state::{Out, State, StateId};
pub use transition::Transition;

pub use config::Config;
