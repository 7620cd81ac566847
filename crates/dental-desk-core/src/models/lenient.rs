//! Number fields that older records stored as form strings.
//!
//! `"35"` and `35` both read as 35; a blank string reads as zero. Values
//! are always written back as JSON numbers.

use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

fn number_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    T::Err: std::fmt::Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) if s.trim().is_empty() => Ok(T::default()),
        NumberOrText::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

pub(crate) fn u32_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    number_or_text(deserializer)
}

pub(crate) fn f64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    number_or_text(deserializer)
}
