use jiff::Zoned;

use crate::diagnostics::Diagnostics;
use crate::status::{Failure, Status};
use crate::trace::TraceId;

/// Result of an operation that produces no payload.
///
/// Born succeeded or failed and never changes state. A failed outcome
/// always carries an error message; a succeeded one never does.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Outcome {
    status: Status,
    #[serde(flatten)]
    diagnostics: Diagnostics,
}

impl Outcome {
    /// Successful outcome stamped from the ambient trace scope.
    pub fn ok() -> Self {
        Self::ok_with(Diagnostics::capture())
    }

    /// Failed outcome. `message` is not validated.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::fail_with(Failure::new(message), Diagnostics::capture())
    }

    /// Failed outcome carrying a machine-readable code alongside the message.
    pub fn fail_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::fail_with(Failure::with_code(message, code), Diagnostics::capture())
    }

    /// Successful outcome using metadata captured by the caller.
    pub fn ok_with(diagnostics: Diagnostics) -> Self {
        Self {
            status: Status::Succeeded,
            diagnostics,
        }
    }

    /// Failed outcome using metadata captured by the caller.
    pub fn fail_with(failure: Failure, diagnostics: Diagnostics) -> Self {
        tracing::debug!(
            trace_id = %diagnostics.trace_id(),
            code = failure.code(),
            "operation failed: {}",
            failure.message()
        );
        Self {
            status: Status::Failed(failure),
            diagnostics,
        }
    }

    pub(crate) fn from_parts(status: Status, diagnostics: Diagnostics) -> Self {
        Self {
            status,
            diagnostics,
        }
    }

    pub(crate) fn into_parts(self) -> (Status, Diagnostics) {
        (self.status, self.diagnostics)
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.status.failure()
    }

    /// Present iff the outcome failed.
    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(Failure::message)
    }

    pub fn error_code(&self) -> Option<&str> {
        self.failure().and_then(Failure::code)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn trace_id(&self) -> &TraceId {
        self.diagnostics.trace_id()
    }

    pub fn timestamp(&self) -> &Zoned {
        self.diagnostics.timestamp()
    }

    pub fn warnings(&self) -> &[String] {
        self.diagnostics.warnings()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.warnings().len()
    }

    /// Append a non-fatal warning. Status is unaffected.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.diagnostics.add_warning(warning);
    }

    pub fn extend_warnings<I, W>(&mut self, warnings: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.diagnostics.extend_warnings(warnings);
    }

    /// Convert into a std `Result`, dropping the diagnostics.
    ///
    /// # Errors
    /// Returns the `Failure` if the outcome failed.
    pub fn into_result(self) -> Result<(), Failure> {
        self.status.into_result()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_summary(f, &self.status, self.trace_id())
    }
}

/// `ok [trace]` or `failed [trace]: message`.
pub(crate) fn write_summary(
    f: &mut std::fmt::Formatter<'_>,
    status: &Status,
    trace_id: &TraceId,
) -> std::fmt::Result {
    match status {
        Status::Succeeded => write!(f, "ok [{trace_id}]"),
        Status::Failed(failure) => write!(f, "failed [{trace_id}]: {failure}"),
    }
}
