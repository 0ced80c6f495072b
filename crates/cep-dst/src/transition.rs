//! Edges of a DST: `(from, predicate, to, data-update, stream-update)`.

use crate::config::{DataUpdate, StreamUpdate};
use crate::predicate::{EventTag, Predicate};
use crate::state::StateId;

#[derive(Debug, Clone)]
pub struct Transition {
    pub from: StateId,
    pub predicate: Predicate,
    pub to: StateId,
    pub data_update: DataUpdate,
    pub stream_update: StreamUpdate,
}

impl Transition {
    /// PROCEED: epsilon transition. Always carries the identity data-update
    /// and identity stream-update — no TAKE on ε.
    pub fn epsilon(from: StateId, to: StateId) -> Transition {
        Transition {
            from,
            predicate: Predicate::epsilon(),
            to,
            data_update: DataUpdate::new(),
            stream_update: None,
        }
    }

    /// TAKE: consumes an event and binds it to `sink`. Always carries a
    /// concrete event-type tag, never ε.
    pub fn take(
        from: StateId,
        predicate: Predicate,
        to: StateId,
        data_update: DataUpdate,
        sink: impl Into<String>,
    ) -> Transition {
        debug_assert_ne!(predicate.tag, EventTag::Epsilon, "TAKE cannot be epsilon");
        Transition {
            from,
            predicate,
            to,
            data_update,
            stream_update: Some(sink.into()),
        }
    }

    /// IGNORE: consumes an event but binds nothing.
    pub fn ignore(
        from: StateId,
        predicate: Predicate,
        to: StateId,
        data_update: DataUpdate,
    ) -> Transition {
        debug_assert_ne!(predicate.tag, EventTag::Epsilon, "IGNORE cannot be epsilon");
        Transition {
            from,
            predicate,
            to,
            data_update,
            stream_update: None,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.predicate.tag == EventTag::Epsilon
    }
}
