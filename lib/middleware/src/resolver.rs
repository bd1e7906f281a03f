use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use field_trace_telemetry::{FaultDetail, TraceContext};

use crate::path::ResponsePath;

/// Error produced by a field resolver.
///
/// The text fields are what ends up on a faulted span; `source` exists for
/// callers that want the underlying error and is never attached to spans
/// (see [`FieldError::fault_detail`]).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    /// Error class or category, when the producer has one.
    pub name: Option<String>,
    /// Captured backtrace or stack text, when available.
    pub stack: Option<String>,
    /// The underlying error, for callers. Not attached to spans.
    #[source]
    pub source: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        FieldError {
            message: message.into(),
            name: None,
            stack: None,
            source: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Normalize for span attachment: message, name, and stack text only.
    /// The source chain stays behind, so recording a fault never touches an
    /// arbitrary error graph. This cannot fail.
    pub fn fault_detail(&self) -> FaultDetail {
        FaultDetail {
            message: self.message.clone(),
            name: self.name.clone(),
            stack: self.stack.clone(),
        }
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

/// What a resolver invocation produced.
///
/// `Ready` covers both synchronous outcomes (a value, or an immediate
/// error); `Pending` is a computation that settles later. The tracing
/// wrapper branches on exactly this split.
pub enum Resolved {
    Ready(Result<Value, FieldError>),
    Pending(BoxFuture<'static, Result<Value, FieldError>>),
}

impl Resolved {
    pub fn ok(value: Value) -> Self {
        Resolved::Ready(Ok(value))
    }

    pub fn err(error: impl Into<FieldError>) -> Self {
        Resolved::Ready(Err(error.into()))
    }

    pub fn pending(
        future: impl std::future::Future<Output = Result<Value, FieldError>> + Send + 'static,
    ) -> Self {
        Resolved::Pending(Box::pin(future))
    }

    /// Settle the outcome, awaiting when pending. Test/engine convenience.
    pub async fn settle(self) -> Result<Value, FieldError> {
        match self {
            Resolved::Ready(result) => result,
            Resolved::Pending(future) => future.await,
        }
    }
}

/// State shared by every resolver invocation of one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The request's ambient trace scope, passed explicitly rather than
    /// kept in task-local storage.
    pub trace: TraceContext,
}

impl RequestContext {
    pub fn new(trace: TraceContext) -> Self {
        RequestContext { trace }
    }
}

/// Everything the execution engine hands a resolver for one field.
pub struct ResolverContext {
    pub parent: Value,
    pub args: Map<String, Value>,
    pub request: Arc<RequestContext>,
    pub path: Arc<ResponsePath>,
}

/// A declared field resolver. Shared so the same resolver can serve
/// interleaved invocations.
pub type ResolverFn = Arc<dyn Fn(&ResolverContext) -> Resolved + Send + Sync>;
