//! Attribution types for merged gas history spans.

/// A continuous span of timestamps [start..=end] that a connector contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start timestamp (seconds since epoch).
    pub start: i64,
    /// Inclusive end timestamp (seconds since epoch).
    pub end: i64,
}

/// Attribution of merged gas history: which connector supplied which candle spans.
///
/// Built while combining candles from several connectors; a new span is emitted
/// whenever the contributing connector changes along the sorted timeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribution {
    /// Collected spans annotated by connector name.
    pub spans: Vec<(&'static str, Span)>,
}

impl Attribution {
    /// Create an empty attribution container.
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: vec![] }
    }

    /// Record a provider span contribution.
    pub fn push(&mut self, item: (&'static str, Span)) {
        self.spans.push(item);
    }

    /// Extend the last span when `connector` also supplied the previous candle,
    /// otherwise open a new span at `ts`.
    pub fn record(&mut self, connector: &'static str, ts: i64) {
        if let Some((name, span)) = self.spans.last_mut()
            && *name == connector
        {
            span.end = ts;
            return;
        }
        self.push((connector, Span { start: ts, end: ts }));
    }
}
