use std::cell::RefCell;

use crate::error::OutcomeError;

/// Correlation identifier attached to every outcome. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraceId(String);

impl TraceId {
    /// Wrap an identifier supplied by an external tracing context.
    ///
    /// # Errors
    /// Returns `OutcomeError::InvalidTraceId` if `raw` is empty or blank.
    pub fn new(raw: &str) -> Result<Self, OutcomeError> {
        if raw.trim().is_empty() {
            return Err(OutcomeError::InvalidTraceId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Synthesize a fresh, globally unique id (ULID).
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Reuse the id offered by `source`, or generate one if it has none.
    pub fn resolve<S: TraceSource + ?Sized>(source: &S) -> Self {
        source.trace_id().unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TraceId {
    type Error = OutcomeError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<TraceId> for String {
    fn from(id: TraceId) -> String {
        id.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TraceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Something that may know the trace id of the operation in progress.
///
/// Implemented by the hosting application's tracing glue; outcome
/// constructors only ever read from it.
pub trait TraceSource {
    /// The active trace id, or `None` when no trace context is active.
    fn trace_id(&self) -> Option<TraceId>;
}

/// Reads the scope installed by [`with_trace_id`], then the current
/// `tracing` span.
///
/// Span ids are only unique among spans that are alive at the same time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambient;

impl TraceSource for Ambient {
    fn trace_id(&self) -> Option<TraceId> {
        current_trace_id().or_else(current_span_id)
    }
}

/// Id of the entered `tracing` span, if a subscriber is tracking one.
fn current_span_id() -> Option<TraceId> {
    tracing::Span::current()
        .id()
        .map(|id| TraceId(id.into_u64().to_string()))
}

/// Never reports an active context, so every outcome gets a fresh id.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl TraceSource for Detached {
    fn trace_id(&self) -> Option<TraceId> {
        None
    }
}

impl TraceSource for TraceId {
    fn trace_id(&self) -> Option<TraceId> {
        Some(self.clone())
    }
}

impl<S: TraceSource + ?Sized> TraceSource for &S {
    fn trace_id(&self) -> Option<TraceId> {
        (**self).trace_id()
    }
}

thread_local! {
    /// Stack of active trace ids on this thread. Innermost scope is last.
    static SCOPE: RefCell<Vec<TraceId>> = const { RefCell::new(Vec::new()) };
}

/// Pops the innermost scope on drop, including during unwinding.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let _ = SCOPE.try_with(|scope| scope.borrow_mut().pop());
    }
}

/// Run `f` with `id` as the ambient trace id on the current thread.
///
/// Scopes nest; the innermost id wins and the outer one is restored
/// when `f` returns or unwinds.
pub fn with_trace_id<R>(id: TraceId, f: impl FnOnce() -> R) -> R {
    tracing::trace!(trace_id = %id, "entering trace scope");
    SCOPE.with(|scope| scope.borrow_mut().push(id));
    let _guard = ScopeGuard;
    f()
}

/// The innermost ambient trace id on this thread, if any.
pub fn current_trace_id() -> Option<TraceId> {
    SCOPE.with(|scope| scope.borrow().last().cloned())
}

pub fn is_tracing_active() -> bool {
    SCOPE.with(|scope| !scope.borrow().is_empty())
}
