//! Compile-time failure modes.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("unknown AST node kind: {0}")]
    UnknownNodeKind(String),
    #[error("schema incomplete: missing event type(s) {missing:?}")]
    SchemaIncomplete { missing: Vec<String> },
    #[error("pattern-variable conflict: {0}")]
    VariableConflict(String),
}
