/// Errors raised while validating outcome metadata.
///
/// Outcome constructors never return these; only the validating
/// `TraceId` parsers do.
#[derive(Debug, thiserror::Error)]
pub enum OutcomeError {
    #[error("invalid trace id: {0:?}")]
    InvalidTraceId(String),
}
