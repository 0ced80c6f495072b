//! Event-driven executor for compiled CEP queries: in-line epsilon
//! closure, accepting-configuration discovery, and after-match skip.

mod executor;
mod strategy;

pub use cep_dst::{Config, Dst, Match};
pub use executor::Executor;
pub use strategy::SkipStrategy;
