use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use field_trace_telemetry::{FieldTracer, SpanHandle};

use crate::resolver::{FieldError, Resolved, ResolverContext, ResolverFn};
use crate::schema::ResolverMap;

/// Every field span is named `"GraphQL <field path>"`.
pub const SPAN_NAME_PREFIX: &str = "GraphQL ";

/// Installer options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TraceResolversOptions {
    /// When `false`, [`ResolverTracer::install`] returns the map untouched:
    /// no wrapper, no span, zero overhead per field.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for TraceResolversOptions {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Wraps every declared resolver of a [`ResolverMap`] in a per-field span.
///
/// Each wrapped invocation derives its span name from the field's response
/// position, opens a span under the request's trace scope, runs the original
/// resolver, and closes the span exactly once when the outcome is known —
/// immediately for synchronous outcomes, from a continuation for pending
/// ones. The resolver's value or error reaches the caller unchanged.
///
/// Install at most once per map: a second install wraps the wrappers and
/// every field gets reported twice. This is a caller precondition, not
/// checked at runtime.
pub struct ResolverTracer {
    tracer: Arc<FieldTracer>,
    options: TraceResolversOptions,
}

impl ResolverTracer {
    pub fn new(tracer: Arc<FieldTracer>) -> Self {
        Self::with_options(tracer, TraceResolversOptions::default())
    }

    pub fn with_options(tracer: Arc<FieldTracer>, options: TraceResolversOptions) -> Self {
        ResolverTracer { tracer, options }
    }

    /// Replace every declared resolver with its traced wrapper.
    pub fn install(&self, schema: ResolverMap) -> ResolverMap {
        if !self.options.enabled {
            debug!("resolver tracing disabled by options, leaving resolvers untouched");
            return schema;
        }
        let mut wrapped = 0usize;
        let schema = schema.map_resolvers(|_type_name, _field_name, resolver| {
            wrapped += 1;
            wrap_resolver(self.tracer.clone(), resolver)
        });
        debug!(resolver_count = wrapped, "installed tracing on declared resolvers");
        schema
    }
}

fn wrap_resolver(tracer: Arc<FieldTracer>, inner: ResolverFn) -> ResolverFn {
    Arc::new(move |ctx: &ResolverContext| {
        let span_name = format!("{}{}", SPAN_NAME_PREFIX, ctx.path.field_path());
        let span = tracer.begin_span(&ctx.request.trace, &span_name);

        match inner(ctx) {
            Resolved::Ready(result) => {
                // Synchronous outcome: the span closes before the caller
                // sees the result.
                if let Some(span) = span {
                    close_with_outcome(span, &result);
                }
                Resolved::Ready(result)
            }
            Resolved::Pending(future) => match span {
                // No span to manage; hand the pending value straight back.
                None => Resolved::Pending(future),
                // The span stays open until the future settles. The wrapper
                // returns immediately so sibling fields are not blocked.
                Some(span) => Resolved::Pending(Box::pin(async move {
                    let result = future.await;
                    close_with_outcome(span, &result);
                    result
                })),
            },
        }
    })
}

fn close_with_outcome(span: SpanHandle, result: &Result<Value, FieldError>) {
    match result {
        Ok(_) => span.close(None),
        Err(error) => span.close(Some(error.fault_detail())),
    }
}
