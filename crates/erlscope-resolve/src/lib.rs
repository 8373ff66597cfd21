//! Name resolution for Erlang sources: references to variables, functions,
//! records, record fields, macros, types, modules and include paths are
//! resolved to their declaring node, a built-in, or nothing.
//!
//! The engine is a pure function of the project snapshot. Per-file
//! declaration indexes are memoized through salsa; resolution itself runs on
//! a per-request [`Resolver`] that carries a cancellation token, so an
//! editor can abandon a stale request without waiting for it.

pub mod builtins;
pub mod cancel;
pub mod candidates;
pub mod core;
pub mod error;
pub mod includes;
pub mod reference;
pub mod rename;
pub mod types;
pub mod walker;

pub use cancel::CancelToken;
pub use candidates::{Candidate, CandidateKind, InsertBehavior};
pub use self::core::Resolver;
pub use error::{RenameError, ResolverWarning};
pub use reference::{RefKind, Reference};
pub use rename::FileRenamer;
pub use types::{Builtin, ResolvedTarget};

use erlscope_source::{report_diagnostic, SourceDatabase, SourceFile};
use erlscope_syntax::DeclarationIndex;

/// Database trait for the resolution layer.
#[salsa::db]
pub trait ResolveDatabase: SourceDatabase {
    /// The memoized declaration index of a file.
    fn declaration_index<'db>(&'db self, file: SourceFile) -> &'db DeclarationIndex
    where
        Self: Sized,
    {
        declaration_index_query(self, file)
    }
}

/// Builds the per-file declaration index. Duplicate declarations are
/// reported through the diagnostic accumulator while indexing.
#[salsa::tracked(return_ref)]
pub fn declaration_index_query(db: &dyn ResolveDatabase, file: SourceFile) -> DeclarationIndex {
    let index = DeclarationIndex::build(file.tree(db));
    for warning in self::core::duplicate_definitions_in(file.tree(db), &index) {
        report_diagnostic(db, file.location(db).clone(), warning);
    }
    index
}
