//! Diagnostic channel for tracked queries.
//!
//! Salsa accumulators let memoized functions report findings without side
//! effects: a query pushes diagnostics while computing, and callers collect
//! whatever a given query invocation accumulated. The engine uses this for
//! advisory findings (e.g. duplicate declarations noticed while indexing a
//! file); resolution outcomes themselves are plain return values, never
//! diagnostics.

use miette::Diagnostic;
use salsa::Accumulator;
use std::{error::Error, fmt::Display, panic::RefUnwindSafe, sync::Arc};

/// A diagnostic produced during an engine query, tagged with the location of
/// the file it concerns.
#[salsa::accumulator]
pub struct EngineDiagnostic {
    pub location: String,
    pub report: Arc<dyn EngineReport>,
}

/// Any miette-capable error or warning the engine can accumulate.
pub trait EngineReport:
    Diagnostic + Send + Sync + RefUnwindSafe + Display + Error + 'static
{
}

impl<T: Diagnostic + Send + Sync + RefUnwindSafe + Display + Error + 'static> EngineReport for T {}

/// Pushes a diagnostic onto the accumulator of the currently running query.
pub fn report_diagnostic<R: EngineReport>(db: &dyn salsa::Database, location: String, report: R) {
    EngineDiagnostic {
        location,
        report: Arc::new(report),
    }
    .accumulate(db);
}
