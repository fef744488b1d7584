//! Category commands and list filters.

pub use idiom_catalog::{MajorType, MinorType};

/// Filter accepted by the category list operations.
///
/// The literal `all`, a missing value and a blank value all mean
/// "unfiltered".
///
/// # Examples
/// ```
/// use chengyu_backend::domain::TypeCodeFilter;
///
/// assert_eq!(TypeCodeFilter::from_query(Some("all")), TypeCodeFilter::All);
/// assert_eq!(
///     TypeCodeFilter::from_query(Some("DW")),
///     TypeCodeFilter::Code("DW".to_owned())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeCodeFilter {
    /// Every category.
    #[default]
    All,
    /// Only the category with this code.
    Code(String),
}

impl TypeCodeFilter {
    /// Interpret the raw `type_code` query parameter.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("" | "all") => Self::All,
            Some(code) => Self::Code(code.to_owned()),
        }
    }

    /// Whether `type_code` passes the filter.
    pub fn matches(&self, type_code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Code(code) => code == type_code,
        }
    }
}

/// Validated request to create a major category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMajorType {
    /// Unique code, trimmed and non-empty.
    pub type_code: String,
    /// Display name, trimmed and non-empty.
    pub type_name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl NewMajorType {
    /// Entity that a successful insert produces.
    pub fn to_entity(&self) -> MajorType {
        MajorType {
            type_code: self.type_code.clone(),
            type_name: self.type_name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Validated request to create a minor category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMinorType {
    /// Unique code, trimmed and non-empty.
    pub type_code: String,
    /// Code of the parent major category.
    pub major_type_code: String,
    /// Display name, trimmed and non-empty.
    pub type_name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl NewMinorType {
    /// Entity that a successful insert produces.
    pub fn to_entity(&self) -> MinorType {
        MinorType {
            type_code: self.type_code.clone(),
            major_type_code: self.major_type_code.clone(),
            type_name: self.type_name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Validated rename of an existing category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUpdate {
    /// New display name, trimmed and non-empty.
    pub type_name: String,
    /// New description; `None` clears it.
    pub description: Option<String>,
}
