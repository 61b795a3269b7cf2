use jiff::{Timestamp, Zoned, tz::TimeZone};

use crate::trace::{Ambient, TraceId, TraceSource};

/// Settings applied when capturing outcome metadata.
#[derive(Debug, Clone)]
pub struct OutcomeConfig {
    /// Zone the construction timestamp is expressed in.
    pub time_zone: TimeZone,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            time_zone: TimeZone::system(),
        }
    }
}

/// Metadata shared by every outcome shape.
///
/// Trace id and timestamp are fixed at capture time. Warnings can only
/// be appended.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostics {
    trace_id: TraceId,
    timestamp: Zoned,
    #[serde(default)]
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Capture metadata from the ambient trace scope in the local zone.
    pub fn capture() -> Self {
        Self::capture_with(&Ambient, &OutcomeConfig::default())
    }

    /// Capture metadata from an explicit trace source and config.
    pub fn capture_with<S: TraceSource + ?Sized>(source: &S, config: &OutcomeConfig) -> Self {
        Self {
            trace_id: TraceId::resolve(source),
            timestamp: Timestamp::now().to_zoned(config.time_zone.clone()),
            warnings: Vec::new(),
        }
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    pub fn timestamp(&self) -> &Zoned {
        &self.timestamp
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        tracing::trace!(trace_id = %self.trace_id, %warning, "warning added");
        self.warnings.push(warning);
    }

    pub fn extend_warnings<I, W>(&mut self, warnings: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        for warning in warnings {
            self.add_warning(warning);
        }
    }
}
