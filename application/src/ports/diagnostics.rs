//! Port for dispatch-time diagnostics.
//!
//! Some failures happen where no subscriber exists to receive them, such as
//! an interaction whose variant cannot be classified. They are reported to the
//! host through [`DiagnosticSink`] instead of being returned.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port lets a host count,
//! alert on, or test for these conditions.

use relay_domain::Snowflake;
use std::fmt;
use tracing::error;

/// A condition worth surfacing to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchDiagnostic {
    /// The interaction's type code matched none of the known variants; only
    /// the generic event was broadcast.
    UnknownInteractionVariant {
        interaction_id: Snowflake,
        type_code: u8,
    },
}

impl fmt::Display for DispatchDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchDiagnostic::UnknownInteractionVariant {
                interaction_id,
                type_code,
            } => write!(
                f,
                "unknown interaction variant (type {type_code}) for interaction {interaction_id}"
            ),
        }
    }
}

/// Receives diagnostics. Synchronous and non-fallible so reporting never
/// disrupts dispatch.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: DispatchDiagnostic);
}

/// Default sink: logs every diagnostic at `error` level.
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&self, diagnostic: DispatchDiagnostic) {
        error!("{}", diagnostic);
    }
}
