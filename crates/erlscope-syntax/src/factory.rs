use crate::error::SyntaxError;

/// Creates replacement name tokens from text, validating them lexically.
///
/// This is the boundary the rename operations construct their new tokens
/// through; an invalid token text makes the whole rename a no-op instead of
/// producing a broken tree.
pub struct ElementFactory;

impl ElementFactory {
    /// An unquoted atom: lowercase first letter, then letters, digits,
    /// `_` or `@`.
    pub fn atom(text: &str) -> Result<String, SyntaxError> {
        let mut chars = text.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_lowercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
            }
            _ => false,
        };
        if valid {
            Ok(text.to_string())
        } else {
            Err(SyntaxError::InvalidAtom(text.to_string()))
        }
    }

    /// A variable: uppercase first letter or `_`, then word characters.
    pub fn variable(text: &str) -> Result<String, SyntaxError> {
        let mut chars = text.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_uppercase() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
            }
            _ => false,
        };
        if valid {
            Ok(text.to_string())
        } else {
            Err(SyntaxError::InvalidVariable(text.to_string()))
        }
    }

    /// A macro name may be spelled like an atom or like a variable.
    pub fn macro_name(text: &str) -> Result<String, SyntaxError> {
        Self::atom(text)
            .or_else(|_| Self::variable(text))
            .map_err(|_| SyntaxError::InvalidMacroName(text.to_string()))
    }

    /// Contents of a string literal (the part between the quotes).
    pub fn string(text: &str) -> Result<String, SyntaxError> {
        if text.chars().any(|c| c == '"' || c.is_control()) {
            Err(SyntaxError::InvalidString)
        } else {
            Ok(text.to_string())
        }
    }
}
