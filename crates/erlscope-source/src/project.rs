use crate::file::{FileKind, SourceFile};
use fxhash::FxHashSet;

use crate::error::ProjectError;

/// An immutable snapshot of the files resolution runs against.
///
/// A salsa input holding the full file set; the engine never touches the
/// filesystem, so "the project" is whatever the caller put here. Lookup is
/// linear over the file list; the set is one project's sources, not a
/// workspace index.
#[salsa::input]
pub struct Project {
    #[return_ref]
    pub name: String,

    #[return_ref]
    pub files: Vec<SourceFile>,
}

impl Project {
    /// Name-based lookup: every file whose last location segment equals
    /// `name`, restricted to `kinds`. This is the collaborator wildcard
    /// include search and qualified-name resolution are built on.
    pub fn files_by_name(
        self,
        db: &dyn salsa::Database,
        name: &str,
        kinds: &[FileKind],
    ) -> Vec<SourceFile> {
        self.files(db)
            .iter()
            .copied()
            .filter(|file| kinds.contains(&file.kind(db)) && file.file_name(db) == name)
            .collect()
    }

    /// Exact-location lookup, used by direct include resolution.
    pub fn file_at(self, db: &dyn salsa::Database, location: &str) -> Option<SourceFile> {
        self.files(db)
            .iter()
            .copied()
            .find(|file| file.location(db) == location)
    }

    /// Checks the snapshot for duplicate locations. The engine tolerates
    /// duplicates (first match wins everywhere), so this is a validation
    /// hook for callers assembling snapshots, not an internal gate.
    pub fn check_locations(self, db: &dyn salsa::Database) -> Result<(), ProjectError> {
        let mut seen = FxHashSet::default();
        for file in self.files(db) {
            if !seen.insert(file.location(db).as_str()) {
                return Err(ProjectError::DuplicateLocation(file.location(db).clone()));
            }
        }
        Ok(())
    }
}
