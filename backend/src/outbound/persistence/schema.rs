//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Top-level idiom categories.
    idiom_major_types (type_code) {
        type_code -> Varchar,
        type_name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Second-level categories; `major_type_code` references
    /// `idiom_major_types`.
    idiom_minor_types (type_code) {
        type_code -> Varchar,
        major_type_code -> Varchar,
        type_name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Idioms keyed by their normalised text.
    ///
    /// `examples` and `exam_images` hold JSON arrays encoded as text.
    idioms (idiom) {
        idiom -> Varchar,
        description -> Text,
        examples -> Text,
        exam_images -> Nullable<Text>,
        major_type_code -> Nullable<Varchar>,
        minor_type_code -> Nullable<Varchar>,
    }
}

diesel::joinable!(idiom_minor_types -> idiom_major_types (major_type_code));

diesel::allow_tables_to_appear_in_same_query!(idiom_major_types, idiom_minor_types, idioms);
