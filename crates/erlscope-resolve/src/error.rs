use erlscope_syntax::SyntaxError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Advisory findings resolution surfaces alongside its results.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ResolverWarning {
    /// Two declarations of the same name (and arity, where it applies) in
    /// one file. Resolution keeps the first; the later one is unreachable.
    #[error("`{name}` is declared more than once; the first declaration wins")]
    #[diagnostic(
        code(erlscope_resolve::duplicate_definition),
        help("remove or rename the later declaration")
    )]
    DuplicateDefinition {
        name: String,
        #[label("first declaration")]
        first: SourceSpan,
        #[label("unreachable declaration")]
        duplicate: SourceSpan,
    },
}

/// Why a rename request was refused. Rename entry points swallow these into
/// a no-op; the enum exists so the decision points stay explicit.
#[derive(Debug, Error, Diagnostic)]
pub enum RenameError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidName(#[from] SyntaxError),

    #[error("node is not a renameable declaration")]
    #[diagnostic(code(erlscope_resolve::not_renameable))]
    NotRenameable,

    #[error("file rename failed: {0}")]
    #[diagnostic(code(erlscope_resolve::file_rename_failed))]
    FileRename(#[source] std::io::Error),
}
