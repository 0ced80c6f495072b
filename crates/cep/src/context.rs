//! Query context: after-match strategy and event-type schema, plus the
//! top-level `Query` record that couples an AST with its context.

use indexmap::IndexMap;

use crate::ast::Ast;
use cep_vm::SkipStrategy;

/// Unknown after-match strategy string. The only place a bare string,
/// rather than an already-validated `SkipStrategy`, could name an
/// invalid strategy — raised eagerly at `Context` construction, not
/// deferred to first emission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown after-match strategy: {0}")]
    UnknownStrategy(String),
}

fn parse_strategy(s: &str) -> Result<SkipStrategy, ConfigError> {
    match s {
        "NoSkip" => Ok(SkipStrategy::NoSkip),
        "SkipToNext" => Ok(SkipStrategy::SkipToNext),
        "SkipPastLastEvent" => Ok(SkipStrategy::SkipPastLastEvent),
        other => Err(ConfigError::UnknownStrategy(other.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    pub strategy: SkipStrategy,
    pub schema: IndexMap<String, Vec<String>>,
}

impl Context {
    pub fn new(strategy: SkipStrategy, schema: IndexMap<String, Vec<String>>) -> Self {
        Context { strategy, schema }
    }

    /// Build a `Context` from the abstract wire schema, where `strategy`
    /// is one of `"NoSkip"`, `"SkipToNext"`, `"SkipPastLastEvent"`.
    pub fn from_raw(
        strategy: &str,
        schema: IndexMap<String, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        Ok(Context {
            strategy: parse_strategy(strategy)?,
            schema,
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Context {
            strategy: SkipStrategy::default(),
            schema: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Query {
    pub patseq: Ast,
    pub context: Context,
}
