//! Shared idiom catalogue primitives.
//!
//! This crate holds the parts of the idiom catalogue that both the HTTP API
//! and its clients need: the JSON wire model, the two-level category grouping
//! with its browse order, a cyclic cursor over that order, search
//! suggestions, and the pinyin-based type-code generator used when editors
//! add categories.
//!
//! It does no I/O and has no knowledge of storage or transport.
//!
//! # Example
//!
//! ```
//! use idiom_catalog::{BrowseCursor, Idiom, IdiomGroups};
//!
//! let mut classified = Idiom::new("一马当先");
//! classified.major_type_code = Some("DW".to_owned());
//! classified.minor_type_code = Some("SUB_MA".to_owned());
//! let loose = Idiom::new("画蛇添足");
//!
//! let groups = IdiomGroups::from_idioms([loose, classified]);
//! let mut cursor = BrowseCursor::from_groups(&groups);
//!
//! assert_eq!(cursor.current().map(|i| i.idiom.as_str()), Some("一马当先"));
//! assert_eq!(cursor.next_idiom().map(|i| i.idiom.as_str()), Some("画蛇添足"));
//! assert_eq!(cursor.next_idiom().map(|i| i.idiom.as_str()), Some("一马当先"));
//! ```

mod cursor;
mod grouping;
mod model;
mod search;
mod type_code;

pub use cursor::BrowseCursor;
pub use grouping::{
    IdiomGroups, MajorBucket, MinorBuckets, UNCLASSIFIED_LABEL, browse_cmp, bucket_of,
    sort_for_browse,
};
pub use model::{ExamImage, Idiom, MajorType, MinorType, idiom_key};
pub use search::{DEFAULT_SUGGESTION_LIMIT, suggestions};
pub use type_code::{
    MINOR_TYPE_PREFIX, TypeCodeError, TypeCodeKind, generate_type_code, transliterate_initials,
};
