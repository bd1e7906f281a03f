use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::recorder::{SpanId, SpanSink};

/// The error attachment recorded on a faulted span.
///
/// Deliberately flat: three owned strings and nothing else. Resolver errors
/// may hang on to engine-internal state through their source chain, and a
/// recording backend must never be handed a graph it would have to walk (or
/// serialize) to store. Building one of these cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl FaultDetail {
    /// A detail carrying only a message, for plain string errors.
    pub fn from_message(message: impl Into<String>) -> Self {
        FaultDetail {
            message: message.into(),
            name: None,
            stack: None,
        }
    }
}

/// Exclusive handle to an open span.
///
/// Closing consumes the handle, so a span reached through it ends at most
/// once; dropping without closing leaves the span in progress, which is what
/// an abandoned invocation should look like in the recorder.
pub struct SpanHandle {
    id: SpanId,
    name: Arc<str>,
    sink: Arc<dyn SpanSink>,
}

impl SpanHandle {
    pub(crate) fn new(id: SpanId, name: Arc<str>, sink: Arc<dyn SpanSink>) -> Self {
        SpanHandle { id, name, sink }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// End the span, marking it faulted when `fault` is given.
    pub fn close(self, fault: Option<FaultDetail>) {
        tracing::trace!(span_name = %self.name, faulted = fault.is_some(), "closing span");
        self.sink.end_span(self.id, fault);
    }
}

impl fmt::Debug for SpanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
