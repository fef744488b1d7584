//! Encode/decode pair for the JSON text columns of the idioms table.
//!
//! `examples` is always written; `exam_images` is written as a JSON array
//! too, but rows imported from older stores may hold `NULL` or an empty
//! string, both of which decode to an empty list.

use serde_json::Error as JsonError;

use crate::domain::ExamImage;

pub(super) fn encode_examples(examples: &[String]) -> Result<String, JsonError> {
    serde_json::to_string(examples)
}

pub(super) fn encode_exam_images(images: &[ExamImage]) -> Result<String, JsonError> {
    serde_json::to_string(images)
}

pub(super) fn decode_examples(raw: &str) -> Result<Vec<String>, JsonError> {
    decode_list(Some(raw))
}

pub(super) fn decode_exam_images(raw: Option<&str>) -> Result<Vec<ExamImage>, JsonError> {
    decode_list(raw)
}

fn decode_list<T>(raw: Option<&str>) -> Result<Vec<T>, JsonError>
where
    T: serde::de::DeserializeOwned,
{
    match raw.map(str::trim) {
        None | Some("" | "null") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text),
    }
}
