//! Per-field tracing middleware for a graph-query execution engine.
//!
//! [`ResolverTracer::install`] takes the schema's declared resolvers and
//! wraps each one so that resolving a field opens a span named after the
//! field's position in the response tree (`"GraphQL parent.name"`) and
//! closes it exactly once when the resolver's outcome is known, marking the
//! span faulted when the resolver failed. Resolver results and errors pass
//! through unchanged; fields without a declared resolver are untouched.
//!
//! The span backend lives in `field-trace-telemetry` and is reached through
//! an explicit trace scope on the request context. When the request carries
//! no active trace, or the backend is disabled, resolvers run with no span
//! lifecycle at all.

pub mod path;
pub mod resolver;
pub mod schema;
pub mod trace;

pub use path::{PathSegment, ResponsePath};
pub use resolver::{FieldError, RequestContext, Resolved, ResolverContext, ResolverFn};
pub use schema::ResolverMap;
pub use trace::{ResolverTracer, TraceResolversOptions, SPAN_NAME_PREFIX};

#[cfg(test)]
mod tests;
