//! Idiom key normalisation and category code clean-up.
//!
//! Idiom texts are the natural key of the catalogue, so every inbound name
//! is folded to Unicode NFKC and trimmed before it reaches a repository.
//! Full-width and compatibility variants of the same idiom therefore resolve
//! to one row.

pub use idiom_catalog::{ExamImage, Idiom};

/// Validation failures for [`IdiomName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdiomNameError {
    /// The text was empty after normalisation.
    #[error("idiom must not be empty")]
    Empty,
}

/// Normalised idiom text used as a lookup and storage key.
///
/// ## Invariants
/// - NFKC normalised.
/// - No leading or trailing whitespace.
/// - Non-empty.
///
/// # Examples
/// ```
/// use chengyu_backend::domain::IdiomName;
///
/// let name = IdiomName::new(" 一马当先\u{3000}").expect("valid name");
/// assert_eq!(name.as_str(), "一马当先");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdiomName(String);

impl IdiomName {
    /// Normalise and validate raw idiom text.
    pub fn new(raw: &str) -> Result<Self, IdiomNameError> {
        let key = idiom_catalog::idiom_key(raw);
        if key.is_empty() {
            return Err(IdiomNameError::Empty);
        }
        Ok(Self(key))
    }

    /// Borrow the normalised text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take ownership of the normalised text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for IdiomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdiomName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Trim a category code, mapping absent and blank values to `None`.
///
/// # Examples
/// ```
/// use chengyu_backend::domain::normalise_category_code;
///
/// assert_eq!(normalise_category_code(Some(" DW ")), Some("DW".to_owned()));
/// assert_eq!(normalise_category_code(Some("   ")), None);
/// assert_eq!(normalise_category_code(None), None);
/// ```
pub fn normalise_category_code(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
}

/// A complete idiom record whose key and category codes are normalised.
///
/// Repositories only accept this type for writes so that every stored row
/// obeys the key and `NULL` conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdiomRecord {
    name: IdiomName,
    idiom: Idiom,
}

impl IdiomRecord {
    /// Normalise an inbound idiom payload.
    pub fn new(idiom: Idiom) -> Result<Self, IdiomNameError> {
        let name = IdiomName::new(&idiom.idiom)?;
        let major_type_code = normalise_category_code(idiom.major_type_code.as_deref());
        let minor_type_code = normalise_category_code(idiom.minor_type_code.as_deref());
        let idiom = Idiom {
            idiom: name.as_str().to_owned(),
            major_type_code,
            minor_type_code,
            ..idiom
        };
        Ok(Self { name, idiom })
    }

    /// Normalised key.
    pub fn name(&self) -> &IdiomName {
        &self.name
    }

    /// Normalised record.
    pub fn idiom(&self) -> &Idiom {
        &self.idiom
    }

    /// Take ownership of the normalised record.
    pub fn into_idiom(self) -> Idiom {
        self.idiom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("一马当先", "一马当先")]
    #[case("  画蛇添足\n", "画蛇添足")]
    #[case("ＡＢＣ成语", "ABC成语")]
    #[case("对牛弹琴\u{3000}", "对牛弹琴")]
    fn names_are_nfkc_normalised_and_trimmed(#[case] raw: &str, #[case] expected: &str) {
        let name = IdiomName::new(raw).expect("valid name");
        assert_eq!(name.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\u{3000}")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(IdiomName::new(raw), Err(IdiomNameError::Empty));
    }

    #[rstest]
    fn records_store_blank_codes_as_none() {
        let record = IdiomRecord::new(Idiom {
            major_type_code: Some(String::new()),
            minor_type_code: Some("  ".to_owned()),
            ..Idiom::new(" 一马当先 ")
        })
        .expect("valid record");
        assert_eq!(record.name().as_str(), "一马当先");
        assert_eq!(record.idiom().idiom, "一马当先");
        assert!(record.idiom().major_type_code.is_none());
        assert!(record.idiom().minor_type_code.is_none());
    }

    #[rstest]
    fn records_keep_annotations() {
        let mut idiom = Idiom::new("画蛇添足");
        idiom.description = "多此一举".to_owned();
        idiom.examples = vec!["e1".to_owned()];
        idiom.exam_images = vec![ExamImage::new("https://i.example/a.png", "")];
        idiom.major_type_code = Some(" DW".to_owned());
        let record = IdiomRecord::new(idiom).expect("valid record");
        let stored = record.into_idiom();
        assert_eq!(stored.description, "多此一举");
        assert_eq!(stored.examples, ["e1"]);
        assert_eq!(stored.exam_images.len(), 1);
        assert_eq!(stored.major_type_code.as_deref(), Some("DW"));
    }
}
