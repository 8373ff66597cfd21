//! Project-snapshot management for the erlscope engine.
//!
//! This crate owns the salsa inputs the whole engine is queried against:
//! - `SourceFile`: a project-relative location, a file kind and an
//!   externally-parsed syntax tree.
//! - `Project`: the immutable set of files one resolution query ranges over,
//!   with the name-based file lookup collaborator.
//!
//! Both are `#[salsa::input]` structs, so a caller builds the snapshot up
//! front, queries it concurrently from as many readers as it likes, and
//! replaces a file's tree (the rename path) only while no query is running;
//! the single-writer discipline is the caller's to enforce.

mod diagnostic;
mod error;
mod file;
mod project;

pub use diagnostic::{report_diagnostic, EngineDiagnostic, EngineReport};
pub use error::ProjectError;
pub use file::{FileKind, SourceFile, HEADER_SUFFIX, MODULE_SUFFIX};
pub use project::Project;

/// Database trait for the source layer.
///
/// Extended by the resolution database; implemented by the central engine
/// database (and by test databases).
#[salsa::db]
pub trait SourceDatabase: salsa::Database {
    /// Name-based file lookup used by wildcard include resolution and
    /// qualified-name-to-module resolution.
    fn files_by_name(
        &self,
        project: Project,
        name: &str,
        kinds: &[FileKind],
    ) -> Vec<SourceFile>
    where
        Self: Sized,
    {
        project.files_by_name(self, name, kinds)
    }
}
