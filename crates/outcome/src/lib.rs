//! Outcome values for reporting the result of any toolkit operation.
//!
//! An outcome is born either succeeded or failed and never changes state.
//! Every outcome carries a trace id, a local timestamp and an append-only
//! list of non-fatal warnings. [`PayloadOutcome`] additionally carries a
//! typed payload and can be lifted from a plain [`Outcome`].

mod diagnostics;
mod error;
mod outcome;
mod payload;
mod status;
mod trace;

pub use diagnostics::{Diagnostics, OutcomeConfig};
pub use error::OutcomeError;
pub use outcome::Outcome;
pub use payload::PayloadOutcome;
pub use status::{Failure, Status};
pub use trace::{
    Ambient, Detached, TraceId, TraceSource, current_trace_id, is_tracing_active, with_trace_id,
};
