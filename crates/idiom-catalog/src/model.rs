//! JSON wire model for idioms and their categories.
//!
//! Field names follow the HTTP API: idioms use `examImages` while category
//! codes stay snake_case. Lists that the store may hold as `NULL` decode to
//! empty vectors so callers never see a missing list.

use serde::{Deserialize, Deserializer, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Fold idiom text to the key the catalogue stores it under: Unicode NFKC,
/// then trimmed.
///
/// ```
/// use idiom_catalog::idiom_key;
///
/// assert_eq!(idiom_key(" 一马当先\u{3000}"), "一马当先");
/// assert_eq!(idiom_key("ＡＢ"), "AB");
/// ```
#[must_use]
pub fn idiom_key(raw: &str) -> String {
    let normalised: String = raw.nfkc().collect();
    normalised.trim().to_owned()
}

/// An example image attached to an idiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamImage {
    /// Public URL of the hosted image.
    pub url: String,
    /// Removal link issued by the image host, empty when none was issued.
    #[serde(default)]
    pub delete_url: String,
}

impl ExamImage {
    /// Build an image reference from its public and removal URLs.
    pub fn new(url: impl Into<String>, delete_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            delete_url: delete_url.into(),
        }
    }
}

/// A Chinese idiom with its annotations and category assignment.
///
/// `idiom` is the natural key. Category codes are optional; an idiom only
/// counts as classified when both codes are present and non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    /// The idiom text itself, unique across the catalogue.
    pub idiom: String,
    /// Free-form explanation of the idiom.
    #[serde(default)]
    pub description: String,
    /// Example sentences in display order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub examples: Vec<String>,
    /// Example images in display order.
    #[serde(rename = "examImages", default, deserialize_with = "null_as_empty")]
    pub exam_images: Vec<ExamImage>,
    /// Code of the assigned major category.
    #[serde(default, alias = "majorTypeCode")]
    pub major_type_code: Option<String>,
    /// Code of the assigned minor category.
    #[serde(default, alias = "minorTypeCode")]
    pub minor_type_code: Option<String>,
}

impl Idiom {
    /// Start an empty draft for the given idiom text.
    pub fn new(idiom: impl Into<String>) -> Self {
        Self {
            idiom: idiom.into(),
            ..Self::default()
        }
    }

    /// Return the trimmed `(major, minor)` codes when both are non-blank.
    #[must_use]
    pub fn classification(&self) -> Option<(&str, &str)> {
        let major = non_blank(self.major_type_code.as_deref())?;
        let minor = non_blank(self.minor_type_code.as_deref())?;
        Some((major, minor))
    }

    /// Whether both category codes are present after trimming whitespace.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.classification().is_some()
    }
}

/// Top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorType {
    /// Unique category code.
    pub type_code: String,
    /// Display name.
    pub type_name: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Second-level category nested under a [`MajorType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorType {
    /// Unique category code.
    pub type_code: String,
    /// Code of the owning major category.
    pub major_type_code: String,
    /// Display name.
    pub type_name: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|code| !code.is_empty())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("一马当先", "一马当先")]
    #[case(" 一马当先 ", "一马当先")]
    #[case("\u{3000}画蛇添足\t", "画蛇添足")]
    #[case("   ", "")]
    fn idiom_key_folds_width_and_whitespace(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(idiom_key(raw), expected);
    }

    #[rstest]
    #[case(Some("DW"), Some("SUB_MA"), true)]
    #[case(Some(" DW "), Some(" SUB_MA\t"), true)]
    #[case(Some("DW"), None, false)]
    #[case(None, Some("SUB_MA"), false)]
    #[case(Some("  "), Some("SUB_MA"), false)]
    #[case(Some(""), Some(""), false)]
    fn classification_requires_both_codes(
        #[case] major: Option<&str>,
        #[case] minor: Option<&str>,
        #[case] expected: bool,
    ) {
        let mut idiom = Idiom::new("一马当先");
        idiom.major_type_code = major.map(str::to_owned);
        idiom.minor_type_code = minor.map(str::to_owned);
        assert_eq!(idiom.is_classified(), expected);
    }

    #[rstest]
    fn classification_returns_trimmed_codes() {
        let mut idiom = Idiom::new("一马当先");
        idiom.major_type_code = Some(" DW".to_owned());
        idiom.minor_type_code = Some("SUB_MA ".to_owned());
        assert_eq!(idiom.classification(), Some(("DW", "SUB_MA")));
    }

    #[rstest]
    fn null_lists_decode_as_empty() {
        let idiom: Idiom = serde_json::from_value(json!({
            "idiom": "一马当先",
            "description": "d",
            "examples": null,
            "examImages": null,
        }))
        .expect("idiom decodes");
        assert!(idiom.examples.is_empty());
        assert!(idiom.exam_images.is_empty());
    }

    #[rstest]
    fn camel_case_category_aliases_are_accepted() {
        let idiom: Idiom = serde_json::from_value(json!({
            "idiom": "一马当先",
            "majorTypeCode": "DW",
            "minorTypeCode": "SUB_MA",
        }))
        .expect("idiom decodes");
        assert_eq!(idiom.major_type_code.as_deref(), Some("DW"));
        assert_eq!(idiom.minor_type_code.as_deref(), Some("SUB_MA"));
    }

    #[rstest]
    fn idiom_serialises_with_api_field_names() {
        let mut idiom = Idiom::new("一马当先");
        idiom
            .exam_images
            .push(ExamImage::new("https://i.example/a.png", "https://i.example/del"));
        let value = serde_json::to_value(&idiom).expect("idiom encodes");
        assert_eq!(
            value["examImages"][0]["deleteUrl"],
            json!("https://i.example/del")
        );
        assert_eq!(value["major_type_code"], json!(null));
    }
}
