use std::sync::Arc;

use tracing::warn;

use crate::config::{ContextMissingStrategy, TracerConfig};
use crate::context::TraceContext;
use crate::recorder::SpanSink;
use crate::span::SpanHandle;

/// Entry point for opening spans against a sink.
///
/// `begin_span` yields `None` in two cases that callers must treat the same
/// way: the tracer is disabled outright, or the request carries no active
/// trace context. Either way the caller proceeds without a span lifecycle.
pub struct FieldTracer {
    config: TracerConfig,
    sink: Arc<dyn SpanSink>,
}

impl FieldTracer {
    pub fn new(sink: Arc<dyn SpanSink>) -> Self {
        Self::with_config(TracerConfig::default(), sink)
    }

    pub fn with_config(config: TracerConfig, sink: Arc<dyn SpanSink>) -> Self {
        FieldTracer { config, sink }
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Open a span named `name` under the given trace scope.
    pub fn begin_span(&self, scope: &TraceContext, name: &str) -> Option<SpanHandle> {
        if !self.config.enabled {
            return None;
        }
        match scope.trace_id() {
            Some(trace_id) => {
                let name: Arc<str> = Arc::from(name);
                let id = self.sink.start_span(trace_id, &name);
                tracing::trace!(span_name = %name, %trace_id, "opened span");
                Some(SpanHandle::new(id, name, self.sink.clone()))
            }
            None => {
                if self.config.context_missing == ContextMissingStrategy::LogError {
                    warn!(span_name = %name, "no active trace context, span not created");
                }
                None
            }
        }
    }
}
