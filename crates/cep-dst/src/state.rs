//! Process-wide unique state identifiers and the states of a DST.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(0);

/// A globally unique state identity, monotonically assigned.
///
/// Global (not per-DST) uniqueness lets states compiled from different
/// pattern fragments be merged or compared without renumbering, the same
/// way the compiler hands out fresh labels during compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u64);

impl StateId {
    /// Allocate a fresh, never-before-used state id.
    pub fn fresh() -> Self {
        StateId(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Output label: output-name → pattern-variable-name.
pub type Out = IndexMap<String, String>;

/// A state in a DST: identity plus an optional output label. A state with
/// `out.is_some()` is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub out: Option<Out>,
}

impl State {
    pub fn fresh() -> Self {
        State {
            id: StateId::fresh(),
            out: None,
        }
    }

    /// Construct a final state. Panics on an empty `out` — every final
    /// state must have non-empty output (invariant enforced here, the
    /// only constructor that sets `out`).
    pub fn fresh_final(out: Out) -> Self {
        assert!(!out.is_empty(), "final state must have non-empty out");
        State {
            id: StateId::fresh(),
            out: Some(out),
        }
    }

    pub fn is_final(&self) -> bool {
        self.out.is_some()
    }
}
