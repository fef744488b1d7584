//! Category type-code generation from display names.
//!
//! Each Chinese character contributes the initial of its pinyin reading,
//! ASCII letters and digits are kept as-is, and everything else is dropped.
//! The result is uppercased. Minor codes carry [`MINOR_TYPE_PREFIX`] so they
//! never collide with major codes.

use pinyin::ToPinyin;
use thiserror::Error;

/// Prefix applied to generated minor-type codes.
pub const MINOR_TYPE_PREFIX: &str = "SUB_";

/// Which category level a code is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCodeKind {
    /// Top-level category code.
    Major,
    /// Second-level category code, prefixed with [`MINOR_TYPE_PREFIX`].
    Minor,
}

/// Reasons a type code cannot be generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeCodeError {
    /// The display name was blank.
    #[error("category name must not be empty")]
    EmptyName,
    /// Nothing in the display name could be transliterated.
    #[error("category name '{name}' yields no code characters")]
    NoCodeCharacters {
        /// The offending display name.
        name: String,
    },
    /// The generated code is already taken.
    #[error("type code '{code}' already exists")]
    Collision {
        /// The generated code.
        code: String,
    },
}

/// Transliterate `name` into uppercase initials without any prefix.
///
/// ```
/// use idiom_catalog::transliterate_initials;
///
/// assert_eq!(transliterate_initials("动物"), "DW");
/// assert_eq!(transliterate_initials("数字 2"), "SZ2");
/// ```
#[must_use]
pub fn transliterate_initials(name: &str) -> String {
    let mut code = String::with_capacity(name.len());
    for ch in name.chars() {
        if let Some(reading) = ch.to_pinyin() {
            code.push_str(reading.first_letter());
        } else if ch.is_ascii_alphanumeric() {
            code.push(ch);
        }
    }
    code.to_ascii_uppercase()
}

/// Generate a type code for `name`, rejecting codes already in `existing`.
///
/// # Errors
///
/// Returns [`TypeCodeError::EmptyName`] for blank names,
/// [`TypeCodeError::NoCodeCharacters`] when nothing transliterates and
/// [`TypeCodeError::Collision`] when the code is already in use.
pub fn generate_type_code<'a, I>(
    name: &str,
    kind: TypeCodeKind,
    existing: I,
) -> Result<String, TypeCodeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TypeCodeError::EmptyName);
    }
    let initials = transliterate_initials(trimmed);
    if initials.is_empty() {
        return Err(TypeCodeError::NoCodeCharacters {
            name: trimmed.to_owned(),
        });
    }
    let code = match kind {
        TypeCodeKind::Major => initials,
        TypeCodeKind::Minor => format!("{MINOR_TYPE_PREFIX}{initials}"),
    };
    if existing.into_iter().any(|taken| taken == code) {
        return Err(TypeCodeError::Collision { code });
    }
    Ok(code)
}
