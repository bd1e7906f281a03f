use std::sync::Mutex;
use std::time::Instant;

use crate::context::TraceId;
use crate::span::FaultDetail;

/// Index of a span within its sink.
pub type SpanId = usize;

/// Destination for span lifecycle events.
///
/// `start_span` and `end_span` are paired through the returned [`SpanId`];
/// the tracer guarantees at most one `end_span` per id. A sink that fails
/// internally should panic rather than swallow the defect, since dropping
/// lifecycle events corrupts the trace silently.
pub trait SpanSink: Send + Sync + 'static {
    fn start_span(&self, trace_id: &TraceId, name: &str) -> SpanId;
    fn end_span(&self, id: SpanId, fault: Option<FaultDetail>);
}

/// A span as the in-memory recorder saw it.
#[derive(Debug, Clone)]
pub struct RecordedSpan {
    pub name: String,
    pub trace_id: TraceId,
    pub start: Instant,
    pub end: Option<Instant>,
    pub fault: Option<FaultDetail>,
}

impl RecordedSpan {
    /// Still open: started but not yet ended.
    pub fn in_progress(&self) -> bool {
        self.end.is_none()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn duration(&self) -> Option<std::time::Duration> {
        self.end.map(|end| end.duration_since(self.start))
    }
}

/// Sink that keeps every span in memory, in start order.
///
/// This is the observation surface for tests and local debugging; a real
/// deployment would put an exporting sink behind the same trait.
#[derive(Default)]
pub struct InMemorySpanRecorder {
    spans: Mutex<Vec<RecordedSpan>>,
}

impl InMemorySpanRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all spans recorded so far.
    pub fn spans(&self) -> Vec<RecordedSpan> {
        self.spans.lock().unwrap().clone()
    }

    /// Snapshot of the spans with the given name.
    pub fn spans_named(&self, name: &str) -> Vec<RecordedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|span| span.name == name)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.lock().unwrap().len()
    }
}

impl SpanSink for InMemorySpanRecorder {
    fn start_span(&self, trace_id: &TraceId, name: &str) -> SpanId {
        let mut spans = self.spans.lock().unwrap();
        spans.push(RecordedSpan {
            name: name.to_string(),
            trace_id: trace_id.clone(),
            start: Instant::now(),
            end: None,
            fault: None,
        });
        spans.len() - 1
    }

    fn end_span(&self, id: SpanId, fault: Option<FaultDetail>) {
        let mut spans = self.spans.lock().unwrap();
        let span = spans
            .get_mut(id)
            .expect("end_span called with an id this sink never issued");
        span.end = Some(Instant::now());
        span.fault = fault;
    }
}
