use miette::Diagnostic;
use thiserror::Error;

/// Errors around assembling and editing a project snapshot.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Two files in a snapshot share a location.
    #[error("duplicate file location: {0}")]
    #[diagnostic(
        code(erlscope_source::duplicate_location),
        help("every file in a project snapshot needs a distinct location")
    )]
    DuplicateLocation(String),

    /// A location that is neither a module nor a header file.
    #[error("unrecognized file kind for location: {0}")]
    #[diagnostic(
        code(erlscope_source::unrecognized_kind),
        help("only `.erl` modules and `.hrl` headers are recognized")
    )]
    UnrecognizedKind(String),

    /// The virtual rename of a file failed; the caller's tree is untouched.
    #[error("could not rename file {location}: {reason}")]
    #[diagnostic(code(erlscope_source::file_rename_failed))]
    FileRenameFailed { location: String, reason: String },
}
