use miette::Diagnostic;
use thiserror::Error;

/// Errors raised when constructing replacement tokens.
///
/// The resolution engine itself never surfaces these; rename swallows them
/// and degrades to a no-op.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("`{0}` is not a valid atom")]
    #[diagnostic(
        code(erlscope_syntax::invalid_atom),
        help("atoms start with a lowercase letter followed by letters, digits, `_` or `@`")
    )]
    InvalidAtom(String),

    #[error("`{0}` is not a valid variable name")]
    #[diagnostic(
        code(erlscope_syntax::invalid_variable),
        help("variables start with an uppercase letter or `_`")
    )]
    InvalidVariable(String),

    #[error("`{0}` is not a valid macro name")]
    #[diagnostic(code(erlscope_syntax::invalid_macro_name))]
    InvalidMacroName(String),

    #[error("string literal contains a quote or control character")]
    #[diagnostic(code(erlscope_syntax::invalid_string))]
    InvalidString,
}
