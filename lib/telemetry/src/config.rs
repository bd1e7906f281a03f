use serde::{Deserialize, Serialize};

/// Tracer configuration, injected when the tracer is constructed.
///
/// The backend-wide kill switch lives here as an explicit value, not as
/// process-wide state read at span-creation time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TracerConfig {
    /// Backend-wide switch. When `false`, no span is ever created,
    /// regardless of what callers ask for.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// What to do when a span is requested while the request carries no
    /// active trace context.
    #[serde(default)]
    pub context_missing: ContextMissingStrategy,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            context_missing: ContextMissingStrategy::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Policy for span requests made outside any active trace context.
///
/// Missing context is a degraded-but-valid mode: the resolver still runs,
/// no span lifecycle happens. The only question is whether to say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMissingStrategy {
    /// Log a warning and continue without a span.
    #[default]
    LogError,
    /// Continue without a span, silently.
    Ignore,
}
