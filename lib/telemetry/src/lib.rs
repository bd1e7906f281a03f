//! Span backend for per-field resolver tracing.
//!
//! The middleware crate only ever talks to three things from here: a
//! [`tracer::FieldTracer`] to open spans, the [`span::SpanHandle`] it hands
//! back, and the [`context::TraceContext`] carried by the request. Where the
//! spans end up is behind the [`recorder::SpanSink`] trait; the bundled
//! [`recorder::InMemorySpanRecorder`] is what tests and local inspection use.

pub mod config;
pub mod context;
pub mod recorder;
pub mod span;
pub mod tracer;

pub use config::{ContextMissingStrategy, TracerConfig};
pub use context::{TraceContext, TraceId};
pub use recorder::{InMemorySpanRecorder, RecordedSpan, SpanSink};
pub use span::{FaultDetail, SpanHandle};
pub use tracer::FieldTracer;
