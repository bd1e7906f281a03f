use std::fmt;
use std::sync::Arc;

/// Identifier of the trace a request belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(Arc<str>);

impl TraceId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        TraceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ambient trace scope of a request, passed explicitly.
///
/// A plain value carried on the request context rather than task-local
/// storage restored across suspension points: either a trace is active, or
/// the request arrived without one (`missing`). Cheap to clone and never
/// mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct TraceContext {
    trace_id: Option<TraceId>,
}

impl TraceContext {
    /// A context attached to an active trace.
    pub fn active(trace_id: TraceId) -> Self {
        TraceContext {
            trace_id: Some(trace_id),
        }
    }

    /// A context with no active trace. Span requests against it yield no
    /// handle.
    pub fn missing() -> Self {
        TraceContext { trace_id: None }
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.trace_id.is_some()
    }
}
