use erlscope_source::ProjectError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors the engine facade reports when assembling snapshots.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),
}
