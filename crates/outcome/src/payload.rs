use jiff::Zoned;

use crate::diagnostics::Diagnostics;
use crate::outcome::{Outcome, write_summary};
use crate::status::{Failure, Status};
use crate::trace::TraceId;

/// Outcome that also carries a typed payload on success.
///
/// The payload is present when built through [`PayloadOutcome::ok`] and
/// absent on failure or after lifting a plain [`Outcome`]. Whether the
/// payload is meaningful is the caller's call; `ok(None)` is fine when
/// `T` is an `Option`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PayloadOutcome<T> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
    #[serde(flatten)]
    diagnostics: Diagnostics,
}

impl<T> PayloadOutcome<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with(data, Diagnostics::capture())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::fail_with(Failure::new(message), Diagnostics::capture())
    }

    pub fn fail_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::fail_with(Failure::with_code(message, code), Diagnostics::capture())
    }

    pub fn ok_with(data: T, diagnostics: Diagnostics) -> Self {
        Self {
            status: Status::Succeeded,
            payload: Some(data),
            diagnostics,
        }
    }

    pub fn fail_with(failure: Failure, diagnostics: Diagnostics) -> Self {
        Self::from(Outcome::fail_with(failure, diagnostics))
    }

    /// Lift a plain outcome, leaving the payload empty.
    ///
    /// Status, message, trace id and timestamp are copied; warnings are
    /// cloned so the two outcomes never share storage.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        Self::from(outcome.clone())
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

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(Failure::message)
    }

    pub fn error_code(&self) -> Option<&str> {
        self.failure().and_then(Failure::code)
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
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

    /// Project back onto a plain outcome, cloning the metadata.
    pub fn to_outcome(&self) -> Outcome {
        Outcome::from_parts(self.status.clone(), self.diagnostics.clone())
    }

    /// Split into the plain outcome and the payload.
    pub fn into_parts(self) -> (Outcome, Option<T>) {
        (
            Outcome::from_parts(self.status, self.diagnostics),
            self.payload,
        )
    }

    /// Convert into a std `Result`, dropping the diagnostics.
    ///
    /// # Errors
    /// Returns the `Failure` if the outcome failed.
    pub fn into_result(self) -> Result<Option<T>, Failure> {
        self.status.into_result().map(|()| self.payload)
    }
}

impl<T> From<Outcome> for PayloadOutcome<T> {
    fn from(outcome: Outcome) -> Self {
        let (status, diagnostics) = outcome.into_parts();
        Self {
            status,
            payload: None,
            diagnostics,
        }
    }
}

impl<T> std::fmt::Display for PayloadOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_summary(f, &self.status, self.trace_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::OutcomeConfig;
    use crate::trace::{Detached, with_trace_id};

    #[test]
    fn ok_carries_payload() {
        let outcome = PayloadOutcome::ok(42);
        assert!(outcome.is_success());
        assert_eq!(outcome.payload(), Some(&42));
        assert!(outcome.error_message().is_none());
        assert!(outcome.warnings().is_empty());
    }

    #[test]
    fn ok_accepts_empty_looking_payload() {
        let outcome: PayloadOutcome<Option<String>> = PayloadOutcome::ok(None);
        assert!(outcome.is_success());
        assert_eq!(outcome.payload(), Some(&None));
    }

    #[test]
    fn fail_has_no_payload() {
        let outcome: PayloadOutcome<i32> = PayloadOutcome::fail_with_code("not found", "E404");
        assert!(outcome.is_failure());
        assert!(outcome.payload().is_none());
        assert_eq!(outcome.error_message(), Some("not found"));
        assert_eq!(outcome.error_code(), Some("E404"));
    }

    #[test]
    fn from_outcome_copies_metadata() {
        let mut base = Outcome::fail_with_code("x", "E1");
        base.add_warning("w");

        let lifted: PayloadOutcome<i32> = PayloadOutcome::from_outcome(&base);

        assert_eq!(lifted.is_success(), base.is_success());
        assert_eq!(lifted.error_message(), base.error_message());
        assert_eq!(lifted.error_code(), Some("E1"));
        assert_eq!(lifted.trace_id(), base.trace_id());
        assert_eq!(lifted.timestamp(), base.timestamp());
        assert_eq!(lifted.warnings(), base.warnings());
        assert!(lifted.payload().is_none());
    }

    #[test]
    fn from_successful_outcome_still_has_no_payload() {
        let lifted: PayloadOutcome<String> = PayloadOutcome::from_outcome(&Outcome::ok());
        assert!(lifted.is_success());
        assert!(lifted.payload().is_none());
        assert!(lifted.error_message().is_none());
    }

    #[test]
    fn lifted_warnings_are_independent() {
        let mut base = Outcome::fail("x");
        base.add_warning("w");

        let mut lifted: PayloadOutcome<i32> = PayloadOutcome::from_outcome(&base);
        lifted.add_warning("y");
        base.add_warning("z");

        assert_eq!(lifted.warnings(), ["w", "y"]);
        assert_eq!(base.warnings(), ["w", "z"]);
    }

    #[test]
    fn from_impl_matches_from_outcome() {
        let base = Outcome::ok();
        let by_ref: PayloadOutcome<u8> = PayloadOutcome::from_outcome(&base);
        let by_value: PayloadOutcome<u8> = base.into();
        assert_eq!(by_ref, by_value);
    }

    #[test]
    fn to_outcome_drops_payload_and_clones_warnings() {
        let mut outcome = PayloadOutcome::ok("data");
        outcome.add_warning("slow");

        let mut plain = outcome.to_outcome();
        plain.add_warning("plain-only");

        assert!(plain.is_success());
        assert_eq!(plain.trace_id(), outcome.trace_id());
        assert_eq!(outcome.warnings(), ["slow"]);
    }

    #[test]
    fn into_parts_splits_payload() {
        let (plain, payload) = PayloadOutcome::ok(vec![1, 2, 3]).into_parts();
        assert!(plain.is_success());
        assert_eq!(payload, Some(vec![1, 2, 3]));
    }

    #[test]
    fn into_result_maps_status() {
        assert_eq!(PayloadOutcome::ok(7).into_result().unwrap(), Some(7));
        let err = PayloadOutcome::<i32>::fail("boom").into_result().unwrap_err();
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn ambient_trace_id_is_reused() {
        let id = TraceId::new("trace-payload").unwrap();
        let outcome = with_trace_id(id.clone(), || PayloadOutcome::ok(1));
        assert_eq!(outcome.trace_id(), &id);
        assert_eq!(outcome.to_string(), "ok [trace-payload]");
    }

    #[test]
    fn success_round_trip() {
        let config = OutcomeConfig {
            time_zone: jiff::tz::TimeZone::UTC,
        };
        let outcome = PayloadOutcome::ok_with(42, Diagnostics::capture_with(&Detached, &config));

        let json = serde_json::to_string(&outcome).unwrap();
        let back: PayloadOutcome<i32> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, outcome);
        assert_eq!(back.payload(), Some(&42));
    }

    #[test]
    fn serialized_success_carries_payload() {
        let outcome = PayloadOutcome::ok(serde_json::json!({"rows": 2}));
        let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "succeeded");
        assert_eq!(json["payload"]["rows"], 2);
        assert!(json.get("trace_id").is_some());
        assert!(json.get("timestamp").is_some());
    }
}
