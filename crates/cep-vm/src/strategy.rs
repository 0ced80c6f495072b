//! After-match skip strategies, applied during output-emission.

/// Policy for pruning overlapping matches after one is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipStrategy {
    /// Emit every accepting configuration.
    #[default]
    NoSkip,
    /// After emitting a match seeded at step `k`, skip any later accepting
    /// configuration seeded at the same `k`. Other partial matches remain.
    SkipToNext,
    /// After emitting the first accepting match this event, clear the
    /// whole partial-match pool and stop emitting further matches.
    SkipPastLastEvent,
}
